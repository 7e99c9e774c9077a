//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::history::DEFAULT_HISTORY_FILE;
use crate::types::{CompletionParams, Model, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Command-line arguments for the velocius-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: llama3-8b-8192)", "MODEL")]
    pub model: Option<String>,

    /// Path of the persisted conversation history.
    #[arrrg(optional, "History file (default: chat_history.json)", "FILE")]
    pub history: Option<String>,

    /// Maximum tokens per response.
    #[arrrg(optional, "Max tokens per response (default: 1024)", "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Disable streaming; wait for complete responses instead.
    #[arrrg(flag, "Disable streaming responses")]
    pub no_stream: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults. Generation parameters
/// are read from here, fresh, for every request.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// Sampling temperature, in `[0.0, 2.0]`.
    pub temperature: f32,

    /// Maximum tokens per response.
    pub max_tokens: u32,

    /// Optional top-p nucleus sampling value, in `[0.0, 1.0]`.
    pub top_p: Option<f32>,

    /// Free-text stop sequence. Empty or absent means no stop sequence.
    pub stop_sequence: Option<String>,

    /// Ask the service to constrain output to JSON text.
    pub json_mode: bool,

    /// Stream responses fragment by fragment.
    pub streaming: bool,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Path of the persisted conversation history.
    pub history_path: PathBuf,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: llama3-8b-8192
    /// - Temperature: 1.0
    /// - Max tokens: 1024
    /// - Streaming: enabled
    /// - Color: enabled
    /// - History: ./chat_history.json
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: None,
            stop_sequence: None,
            json_mode: false,
            streaming: true,
            use_color: true,
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
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

    /// Sets the stop sequence.
    pub fn with_stop_sequence(mut self, stop_sequence: Option<String>) -> Self {
        self.stop_sequence = stop_sequence;
        self
    }

    /// Sets JSON mode.
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    /// Sets whether responses are streamed.
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets the history file path.
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    /// Builds the generation parameters for the next request.
    ///
    /// An empty stop sequence is normalized to absent here, before it can
    /// reach the wire.
    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams::new(self.model.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_top_p(self.top_p)
            .with_stop(self.stop_sequence.clone())
            .with_json_mode(self.json_mode)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let model = args
            .model
            .map(|s| s.parse::<Model>().unwrap_or(Model::Custom(s)))
            .unwrap_or_default();

        ChatConfig {
            model,
            max_tokens: args.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            streaming: !args.no_stream,
            use_color: !args.no_color,
            history_path: args
                .history
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE)),
            ..ChatConfig::new()
        }
    }
}
