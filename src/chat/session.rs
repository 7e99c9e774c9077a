//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the conversation,
//! drives one turn at a time against the API, and keeps the persisted history
//! file in lockstep with the in-memory conversation.

use std::io;
use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt, pin_mut};

use crate::chat::config::ChatConfig;
use crate::client::Groq;
use crate::error::{Error, Result};
use crate::history::ChatHistory;
use crate::render::Renderer;
use crate::types::{ChatCompletionChunk, Message, Model};

/// A chat session that manages conversation state and API interactions.
///
/// The session is the single source of truth for the conversation. Every
/// mutation is written through to the history file before the session becomes
/// interactive again, so the persisted transcript always equals the in-memory
/// one. Turns are strictly serialized: sending a turn borrows the session
/// mutably, so a second request cannot start while one is in flight.
pub struct ChatSession {
    client: Groq,
    config: ChatConfig,
    messages: Vec<Message>,
    history: ChatHistory,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// The number of messages in the conversation.
    pub message_count: usize,
    /// The sampling temperature.
    pub temperature: f32,
    /// The maximum tokens per response.
    pub max_tokens: u32,
    /// The top-p value, if set.
    pub top_p: Option<f32>,
    /// The configured stop sequence, if any.
    pub stop_sequence: Option<String>,
    /// Whether JSON-constrained output is requested.
    pub json_mode: bool,
    /// Whether responses are streamed.
    pub streaming: bool,
    /// The history file backing this session.
    pub history_path: PathBuf,
}

impl ChatSession {
    /// Creates a new chat session with the given client and configuration.
    ///
    /// The conversation is restored from the configured history file. A
    /// missing file yields an empty conversation.
    pub fn new(client: Groq, config: ChatConfig) -> Result<Self> {
        let history = ChatHistory::new(config.history_path.clone());
        let messages = history.load()?;
        Ok(Self {
            client,
            config,
            messages,
            history,
        })
    }

    /// Sends a user message and renders the response.
    ///
    /// One full turn:
    /// 1. Appends the user message to history and saves.
    /// 2. Sends the full conversation to the API, streaming or not per the
    ///    active configuration.
    /// 3. Renders response text as it arrives.
    /// 4. Appends the complete assistant response and saves again.
    ///
    /// Empty or whitespace-only input does not start a turn: nothing is
    /// appended, nothing is saved, no request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails. The user message stays
    /// appended and persisted; no assistant message is added and no further
    /// save happens, so the conversation is exactly as it was after step 1.
    pub async fn send_turn(
        &mut self,
        user_input: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let input = user_input.trim();
        if input.is_empty() {
            return Ok(());
        }

        self.messages.push(Message::user(input));
        self.history.save(&self.messages)?;

        let params = self.config.completion_params();
        let text = if self.config.streaming {
            let stream = self.client.stream(&self.messages, &params).await?;
            let text = accumulate(stream, renderer).await?;
            if let Some(logger) = self.client.logger() {
                logger.log_stream_message(&Message::assistant(text.clone()));
            }
            text
        } else {
            let completion = self.client.send(&self.messages, &params).await?;
            let text = completion
                .into_message()
                .map(|message| message.content)
                .unwrap_or_default();
            renderer.print_text(&text);
            text
        };

        self.messages.push(Message::assistant(text));
        self.history.save(&self.messages)?;
        renderer.finish_response();
        Ok(())
    }

    /// Clears the conversation and immediately saves the empty history.
    pub fn clear(&mut self) -> Result<()> {
        self.messages.clear();
        self.history.save(&self.messages)
    }

    /// Switches to a different model.
    ///
    /// Changing the model resets the conversation: the history is cleared,
    /// the empty transcript is saved, and a notification naming the newly
    /// selected model is emitted. Selecting the already-active model leaves
    /// the conversation untouched.
    pub fn set_model(&mut self, model: Model, renderer: &mut dyn Renderer) -> Result<()> {
        if self.config.model == model {
            return Ok(());
        }
        self.config.model = model;
        self.clear()?;
        renderer.print_info(&format!(
            "Model changed to {}; conversation cleared.",
            self.config.model
        ));
        Ok(())
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Returns the conversation in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Sets the sampling temperature.
    pub fn set_temperature(&mut self, temperature: f32) {
        self.config.temperature = temperature;
    }

    /// Sets the maximum tokens per response.
    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.config.max_tokens = max_tokens;
    }

    /// Sets the top-p value.
    pub fn set_top_p(&mut self, top_p: Option<f32>) {
        self.config.top_p = top_p;
    }

    /// Sets or clears the stop sequence.
    pub fn set_stop_sequence(&mut self, stop_sequence: Option<String>) {
        self.config.stop_sequence = stop_sequence;
    }

    /// Toggles JSON-constrained output.
    pub fn set_json_mode(&mut self, json_mode: bool) {
        self.config.json_mode = json_mode;
    }

    /// Toggles streaming responses.
    pub fn set_streaming(&mut self, streaming: bool) {
        self.config.streaming = streaming;
    }

    /// Saves the transcript to the specified path.
    ///
    /// The active history file is untouched; this is an extra copy in the
    /// same format.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ChatHistory::new(path.as_ref().to_path_buf()).save(&self.messages)
    }

    /// Loads a transcript from disk, replacing the current conversation.
    ///
    /// The replacement is written through to the active history file.
    pub fn load_from<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::io(
                format!("no transcript at {}", path.display()),
                io::Error::from(io::ErrorKind::NotFound),
            ));
        }
        self.messages = ChatHistory::new(path.to_path_buf()).load()?;
        self.history.save(&self.messages)
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.config.model.clone(),
            message_count: self.message_count(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            stop_sequence: self.config.stop_sequence.clone(),
            json_mode: self.config.json_mode,
            streaming: self.config.streaming,
            history_path: self.history.path().to_path_buf(),
        }
    }
}

/// Concatenates a fragment stream into the full response text.
///
/// Fragments are rendered in delivery order as they arrive. On a mid-stream
/// failure the text rendered so far stays on screen, but the error propagates
/// so no assistant message is recorded from a partial response.
async fn accumulate<S>(stream: S, renderer: &mut dyn Renderer) -> Result<String>
where
    S: Stream<Item = Result<ChatCompletionChunk>>,
{
    pin_mut!(stream);
    let mut text = String::new();
    while let Some(item) = stream.next().await {
        let chunk = item?;
        if let Some(fragment) = chunk.delta_content() {
            text.push_str(fragment);
            renderer.print_text(fragment);
        }
    }
    Ok(text)
}
