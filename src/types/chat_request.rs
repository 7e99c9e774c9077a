use serde::{Deserialize, Serialize};

use crate::types::{CompletionParams, Message, Model, ResponseFormat};

/// Wire-level request body for the `chat/completions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// The model to complete with.
    pub model: Model,

    /// The full ordered conversation, including the just-appended user turn.
    pub messages: Vec<Message>,

    /// Whether to stream the response as server-sent events.
    pub stream: bool,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Output shape constraint.
    pub response_format: ResponseFormat,

    /// Early-termination marker. Omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,

    /// Nucleus sampling value. Omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl ChatRequest {
    /// Builds a request from a conversation and generation parameters.
    pub fn new(messages: Vec<Message>, params: &CompletionParams, stream: bool) -> Self {
        Self {
            model: params.model.clone(),
            messages,
            stream,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            response_format: ResponseFormat::from_json_mode(params.json_mode),
            stop: params.stop.clone().filter(|s| !s.is_empty()),
            top_p: params.top_p,
        }
    }
}
