// Public modules
pub mod chat_completion;
pub mod chat_completion_chunk;
pub mod chat_request;
pub mod completion_params;
pub mod message;
pub mod model;
pub mod response_format;

// Re-exports
pub use chat_completion::{ChatCompletion, Choice, ChoiceMessage};
pub use chat_completion_chunk::{ChatCompletionChunk, ChunkChoice, Delta};
pub use chat_request::ChatRequest;
pub use completion_params::{CompletionParams, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use message::{Message, Role};
pub use model::{KnownModel, Model, UnknownModelError};
pub use response_format::ResponseFormat;
