//! Durable storage for conversation transcripts.
//!
//! The history file is a single UTF-8 JSON document holding the ordered
//! array of `{role, content}` records. Every save rewrites the whole file;
//! there are no partial or append writes. One interactive session is the
//! only reader and writer.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde_json::{from_reader, to_writer_pretty};

use crate::error::{Error, Result};
use crate::observability;
use crate::types::Message;

/// Default history file, written to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "chat_history.json";

/// A conversation transcript bound to one file path.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    path: PathBuf,
}

impl ChatHistory {
    /// Creates a history store backed by the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted conversation.
    ///
    /// A missing file is not an error: it yields an empty conversation.
    pub fn load(&self) -> Result<Vec<Message>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file =
            File::open(&self.path).map_err(|err| Error::io("failed to open history file", err))?;
        let reader = BufReader::new(file);
        let messages: Vec<Message> = from_reader(reader)
            .map_err(|err| Error::serialization("failed to parse history", Some(Box::new(err))))?;
        observability::HISTORY_LOADS.click();
        Ok(messages)
    }

    /// Rewrites the whole file with the given conversation.
    pub fn save(&self, messages: &[Message]) -> Result<()> {
        let file = File::create(&self.path)
            .map_err(|err| Error::io("failed to create history file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, messages)
            .map_err(|err| Error::serialization("failed to serialize history", Some(Box::new(err))))?;
        observability::HISTORY_SAVES.click();
        Ok(())
    }
}
