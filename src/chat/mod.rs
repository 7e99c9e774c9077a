//! Chat application module for interactive conversations with Groq models.
//!
//! This module provides a streaming REPL chat interface built on top of the
//! velocius client library. It supports:
//!
//! - Streaming responses with real-time token display
//! - Durable conversation history with write-through saves
//! - Slash commands for session control
//! - Configurable model and generation parameters
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and API interaction
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatSession, SessionStats};
