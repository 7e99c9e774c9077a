use serde::{Deserialize, Serialize};

/// Constraint on the shape of the model's output.
///
/// With [`ResponseFormat::JsonFormat`] the service is asked to emit
/// structured JSON text. The returned text is passed through opaquely; the
/// client never parses or validates it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form text output.
    #[default]
    Text,

    /// JSON-constrained output.
    JsonFormat,
}

impl ResponseFormat {
    /// Selects the format for the given JSON-mode toggle.
    pub fn from_json_mode(json_mode: bool) -> Self {
        if json_mode {
            ResponseFormat::JsonFormat
        } else {
            ResponseFormat::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn serializes_as_tagged_object() {
        assert_eq!(
            to_value(ResponseFormat::Text).unwrap(),
            json!({"type": "text"})
        );
        assert_eq!(
            to_value(ResponseFormat::JsonFormat).unwrap(),
            json!({"type": "json_format"})
        );
    }

    #[test]
    fn from_json_mode() {
        assert_eq!(ResponseFormat::from_json_mode(false), ResponseFormat::Text);
        assert_eq!(
            ResponseFormat::from_json_mode(true),
            ResponseFormat::JsonFormat
        );
    }
}
