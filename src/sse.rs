//! Server-Sent Events (SSE) processing for streaming responses.
//!
//! The Groq API streams completions as data-only SSE: each event is a
//! `data: {json}` line terminated by a blank line, and the literal
//! `data: [DONE]` marker ends the stream. This module converts the raw byte
//! stream into parsed [`ChatCompletionChunk`] items.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::observability;
use crate::{ChatCompletionChunk, Error, Result};

/// One parsed SSE event.
enum SseEvent {
    /// A completion fragment.
    Chunk(ChatCompletionChunk),

    /// The `[DONE]` end-of-stream marker.
    Done,

    /// An event with nothing to deliver (comment or keep-alive).
    Empty,
}

/// Process a stream of bytes into a stream of completion chunks.
///
/// The returned stream is forward-only and finite: it ends when the upstream
/// service sends its `[DONE]` marker or closes the connection. Transport and
/// parse failures surface as `Err` items.
pub fn process_sse<S>(byte_stream: S) -> impl Stream<Item = Result<ChatCompletionChunk>>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Unpin + 'static,
{
    // Convert reqwest errors to our error type
    let stream = byte_stream.map(|result| {
        result
            .map_err(|e| Error::streaming(format!("Error in HTTP stream: {e}"), Some(Box::new(e))))
    });

    // Use a state machine to process the SSE stream
    let buffer = String::new();

    stream::unfold(
        (stream, buffer),
        move |(mut stream, mut buffer)| async move {
            loop {
                // First check if we have a complete event in the buffer
                if let Some((event, remaining)) = extract_event(&buffer) {
                    buffer = remaining;
                    match event {
                        Ok(SseEvent::Chunk(chunk)) => {
                            observability::STREAM_EVENTS.click();
                            return Some((Ok(chunk), (stream, buffer)));
                        }
                        Ok(SseEvent::Done) => return None,
                        Ok(SseEvent::Empty) => continue,
                        Err(e) => {
                            observability::STREAM_ERRORS.click();
                            return Some((Err(e), (stream, buffer)));
                        }
                    }
                }

                // Read more data
                match stream.next().await {
                    Some(Ok(bytes)) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => buffer.push_str(&text),
                        Err(e) => {
                            observability::STREAM_ERRORS.click();
                            return Some((
                                Err(Error::encoding(
                                    format!("Invalid UTF-8 in stream: {e}"),
                                    Some(Box::new(e)),
                                )),
                                (stream, buffer),
                            ));
                        }
                    },
                    Some(Err(e)) => {
                        observability::STREAM_ERRORS.click();
                        return Some((Err(e), (stream, buffer)));
                    }
                    None => {
                        // Upstream closed without [DONE]; drain what's left.
                        if !buffer.is_empty() {
                            buffer.push_str("\n\n");
                            if let Some((event, remaining)) = extract_event(&buffer) {
                                match event {
                                    Ok(SseEvent::Chunk(chunk)) => {
                                        observability::STREAM_EVENTS.click();
                                        return Some((Ok(chunk), (stream, remaining)));
                                    }
                                    Ok(SseEvent::Done) | Ok(SseEvent::Empty) => return None,
                                    Err(e) => {
                                        observability::STREAM_ERRORS.click();
                                        return Some((Err(e), (stream, String::new())));
                                    }
                                }
                            }
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Extract a complete SSE event from a buffer string.
///
/// Events are delimited by blank lines. Only `data:` lines carry payload;
/// comment lines (leading `:`) and field lines without data are skipped.
fn extract_event(buffer: &str) -> Option<(Result<SseEvent>, String)> {
    let parts: Vec<&str> = buffer.splitn(2, "\n\n").collect();
    if parts.len() != 2 {
        return None;
    }
    let event_text = parts[0];
    let rest = parts[1].to_string();

    let mut data = None;
    for line in event_text.lines() {
        if let Some(payload) = line.strip_prefix("data:") {
            data = Some(payload.trim());
        }
    }

    match data {
        Some("[DONE]") => Some((Ok(SseEvent::Done), rest)),
        Some(json_str) => match serde_json::from_str::<ChatCompletionChunk>(json_str) {
            Ok(chunk) => Some((Ok(SseEvent::Chunk(chunk)), rest)),
            Err(e) => Some((
                Err(Error::serialization(
                    format!("Failed to parse event JSON: {e}"),
                    Some(Box::new(e)),
                )),
                rest,
            )),
        },
        None if event_text.trim().is_empty() || event_text.starts_with(':') => {
            Some((Ok(SseEvent::Empty), rest))
        }
        None => Some((
            Err(Error::streaming(
                format!("Malformed SSE event: no 'data:' line in '{event_text}'"),
                None,
            )),
            rest,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunk_bytes(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"content\":\"{content}\"}}}}]}}\n\n"
        )
    }

    #[tokio::test]
    async fn parse_single_chunk() {
        let data = format!("{}data: [DONE]\n\n", chunk_bytes("Hi"));
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        let event = sse_stream.next().await.unwrap().unwrap();
        assert_eq!(event.delta_content(), Some("Hi"));

        assert!(sse_stream.next().await.is_none());
    }

    #[tokio::test]
    async fn concatenated_fragments_match_single_shot() {
        let data = format!(
            "{}{}data: [DONE]\n\n",
            chunk_bytes("Hi"),
            chunk_bytes(" there")
        );
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        let mut accumulated = String::new();
        while let Some(event) = sse_stream.next().await {
            accumulated.push_str(event.unwrap().delta_content().unwrap_or(""));
        }
        assert_eq!(accumulated, "Hi there");
    }

    #[tokio::test]
    async fn done_marker_terminates_stream() {
        let data = format!("data: [DONE]\n\n{}", chunk_bytes("never"));
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        assert!(sse_stream.next().await.is_none());
    }

    #[tokio::test]
    async fn handle_split_event() {
        // Simulate an event split across multiple chunks
        let chunk1 = b"data: {\"choices\":[{\"index\":0,\"delta\":";
        let chunk2 = b"{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n\n";

        let stream = Box::pin(stream::iter(vec![
            Ok(Bytes::from(&chunk1[..])),
            Ok(Bytes::from(&chunk2[..])),
        ]));

        let mut sse_stream = Box::pin(process_sse(stream));
        let event = sse_stream.next().await.unwrap().unwrap();
        assert_eq!(event.delta_content(), Some("Hi"));
    }

    #[tokio::test]
    async fn handle_malformed_event() {
        let data = b"malformed data without proper format\n\n";
        let stream = Box::pin(stream::once(async { Ok(Bytes::from(&data[..])) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        let event = sse_stream.next().await.unwrap();

        assert!(event.is_err());
    }

    #[tokio::test]
    async fn handle_bad_json() {
        let data = b"data: {not json}\n\n";
        let stream = Box::pin(stream::once(async { Ok(Bytes::from(&data[..])) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        let event = sse_stream.next().await.unwrap();

        assert!(matches!(event, Err(Error::Serialization { .. })));
    }

    #[tokio::test]
    async fn comments_are_skipped() {
        let data = format!(": keep-alive\n\n{}data: [DONE]\n\n", chunk_bytes("ok"));
        let stream = Box::pin(stream::once(async move { Ok(Bytes::from(data)) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        let event = sse_stream.next().await.unwrap().unwrap();
        assert_eq!(event.delta_content(), Some("ok"));
        assert!(sse_stream.next().await.is_none());
    }

    #[tokio::test]
    async fn close_without_done_drains_buffer() {
        // No trailing blank line and no [DONE]; the final event still parses.
        let data = b"data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"tail\"}}]}";
        let stream = Box::pin(stream::once(async { Ok(Bytes::from(&data[..])) }));

        let mut sse_stream = Box::pin(process_sse(stream));
        let event = sse_stream.next().await.unwrap().unwrap();
        assert_eq!(event.delta_content(), Some("tail"));
    }
}
