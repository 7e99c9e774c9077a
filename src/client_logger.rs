//! Logging trait for Groq client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to
//! capture and log all API interactions passing through the
//! [`Groq`](crate::Groq) client.

use crate::{ChatCompletion, ChatCompletionChunk, Message};

/// A trait for logging Groq client operations.
///
/// Implement this trait to capture and record all API interactions,
/// including non-streaming responses, individual streaming chunks, and the
/// reconstructed text of completed streams.
///
/// # Example
///
/// ```rust,ignore
/// use std::io::Write;
/// use std::sync::Mutex;
/// use velocius::{ChatCompletion, ChatCompletionChunk, ClientLogger, Message};
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_response(&self, completion: &ChatCompletion) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Response: {}", serde_json::to_string(completion).unwrap()).unwrap();
///     }
///
///     fn log_stream_chunk(&self, chunk: &ChatCompletionChunk) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Chunk: {}", serde_json::to_string(chunk).unwrap()).unwrap();
///     }
///
///     fn log_stream_message(&self, message: &Message) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Stream complete: {}", serde_json::to_string(message).unwrap()).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a complete response from a non-streaming `send` call.
    fn log_response(&self, completion: &ChatCompletion);

    /// Log an individual streaming chunk.
    ///
    /// This method is called for each [`ChatCompletionChunk`] received
    /// during a streaming request.
    fn log_stream_chunk(&self, chunk: &ChatCompletionChunk);

    /// Log the reconstructed message from a completed stream.
    ///
    /// This method is called once when a stream completes successfully,
    /// with the assistant [`Message`] whose content is the concatenation of
    /// every delivered fragment.
    fn log_stream_message(&self, message: &Message);
}
