// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod history;
pub mod observability;
pub mod render;
pub mod sse;
pub mod types;

// Re-exports
pub use client::Groq;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use history::{ChatHistory, DEFAULT_HISTORY_FILE};
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
