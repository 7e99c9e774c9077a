use serde::{Deserialize, Serialize};

/// Wire-level fragment of a streaming `chat/completions` response.
///
/// Chunks arrive in delivery order; concatenating their delta content yields
/// the full response text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionChunk {
    /// The streamed completion choices. Exactly one is requested.
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

/// A single streamed choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkChoice {
    /// The incremental payload for this fragment.
    #[serde(default)]
    pub delta: Delta,

    /// Why generation stopped. Present only on the final content chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The incremental payload of a streamed choice.
///
/// The first fragment of a stream may carry only the role; the last carries
/// neither role nor content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Delta {
    /// The role of the streamed message, carried by the opening fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The text fragment, when this chunk carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// Returns the text fragment carried by this chunk, if any.
    pub fn delta_content(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.delta.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_chunk() {
        let json = json!({
            "id": "chatcmpl-123",
            "object": "chat.completion.chunk",
            "choices": [
                {"index": 0, "delta": {"content": "Hi"}, "finish_reason": null}
            ]
        });

        let chunk: ChatCompletionChunk = serde_json::from_value(json).unwrap();
        assert_eq!(chunk.delta_content(), Some("Hi"));
    }

    #[test]
    fn opening_chunk_carries_only_the_role() {
        let json = json!({
            "choices": [
                {"index": 0, "delta": {"role": "assistant"}, "finish_reason": null}
            ]
        });

        let chunk: ChatCompletionChunk = serde_json::from_value(json).unwrap();
        assert!(chunk.delta_content().is_none());
        assert_eq!(
            chunk.choices[0].delta.role.as_deref(),
            Some("assistant")
        );
    }

    #[test]
    fn final_chunk_has_no_content() {
        let json = json!({
            "choices": [
                {"index": 0, "delta": {}, "finish_reason": "stop"}
            ]
        });

        let chunk: ChatCompletionChunk = serde_json::from_value(json).unwrap();
        assert!(chunk.delta_content().is_none());
        assert_eq!(
            chunk.choices[0].finish_reason.as_deref(),
            Some("stop")
        );
    }

    #[test]
    fn chunk_without_choices() {
        let chunk: ChatCompletionChunk = serde_json::from_value(json!({})).unwrap();
        assert!(chunk.delta_content().is_none());
    }
}
