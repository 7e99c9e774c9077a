use serde::{Deserialize, Serialize};

use crate::types::{Message, Role};

/// Wire-level response body for a non-streaming `chat/completions` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    /// The generated completion choices. Exactly one is requested.
    pub choices: Vec<Choice>,
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,

    /// Why generation stopped, when the service reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The message payload of a completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    /// The role of the generated message.
    pub role: Role,

    /// The complete response text.
    pub content: String,
}

impl ChatCompletion {
    /// Returns the text of the first choice, if the response contained one.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }

    /// Converts the first choice into an assistant [`Message`].
    pub fn into_message(mut self) -> Option<Message> {
        if self.choices.is_empty() {
            return None;
        }
        let choice = self.choices.swap_remove(0);
        Some(Message::new(choice.message.role, choice.message.content))
    }
}
