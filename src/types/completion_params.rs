use serde::{Deserialize, Serialize};

use crate::types::Model;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// Default maximum tokens per response.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Generation parameters for a single completion request.
///
/// These are ephemeral: built fresh from the active configuration for every
/// request and never persisted. Whether the response is streamed is decided
/// by calling [`Groq::send`](crate::Groq::send) or
/// [`Groq::stream`](crate::Groq::stream).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    /// The model to complete with.
    pub model: Model,

    /// Sampling temperature, in `[0.0, 2.0]`.
    pub temperature: f32,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Nucleus sampling value, in `[0.0, 1.0]`. `None` uses the service
    /// default.
    pub top_p: Option<f32>,

    /// Early-termination marker forwarded to the service. `None` means no
    /// stop sequence; an empty string is never sent on the wire.
    pub stop: Option<String>,

    /// Ask the service to constrain output to JSON text.
    pub json_mode: bool,
}

impl CompletionParams {
    /// Creates parameters for the given model with default sampling values.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: None,
            stop: None,
            json_mode: false,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum tokens per response.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the top-p value.
    pub fn with_top_p(mut self, top_p: Option<f32>) -> Self {
        self.top_p = top_p;
        self
    }

    /// Sets the stop sequence. Empty strings are normalized to absent.
    pub fn with_stop(mut self, stop: Option<String>) -> Self {
        self.stop = stop.filter(|s| !s.is_empty());
        self
    }

    /// Sets JSON mode.
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self::new(Model::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    #[test]
    fn defaults() {
        let params = CompletionParams::default();
        assert_eq!(params.model, Model::Known(KnownModel::Llama3_8b));
        assert_eq!(params.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(params.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(params.top_p.is_none());
        assert!(params.stop.is_none());
        assert!(!params.json_mode);
    }

    #[test]
    fn empty_stop_normalized_to_absent() {
        let params = CompletionParams::default().with_stop(Some(String::new()));
        assert!(params.stop.is_none());

        let params = CompletionParams::default().with_stop(Some("END".to_string()));
        assert_eq!(params.stop.as_deref(), Some("END"));
    }

    #[test]
    fn builder() {
        let params = CompletionParams::new(Model::Known(KnownModel::Gemma2_9bIt))
            .with_temperature(0.4)
            .with_max_tokens(256)
            .with_top_p(Some(0.9))
            .with_json_mode(true);
        assert_eq!(params.temperature, 0.4);
        assert_eq!(params.max_tokens, 256);
        assert_eq!(params.top_p, Some(0.9));
        assert!(params.json_mode);
    }
}
