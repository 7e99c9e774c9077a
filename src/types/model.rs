use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents a Groq model identifier.
///
/// This can be a predefined model version or a custom string value
/// for models that may be added in the future.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier (for future models or private deployments)
    Custom(String),
}

/// Known Groq-hosted model versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// Llama 3 8B with an 8192-token context window
    #[serde(rename = "llama3-8b-8192")]
    Llama3_8b,

    /// Mixtral 8x7B with a 32768-token context window
    #[serde(rename = "mixtral-8x7b-32768")]
    Mixtral8x7b,

    /// Gemma 2 9B instruction-tuned
    #[serde(rename = "gemma2-9b-it")]
    Gemma2_9bIt,
}

impl Model {
    /// The model used when no selection has been made.
    pub fn default_model() -> Self {
        Model::Known(KnownModel::Llama3_8b)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::default_model()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::Llama3_8b => write!(f, "llama3-8b-8192"),
            KnownModel::Mixtral8x7b => write!(f, "mixtral-8x7b-32768"),
            KnownModel::Gemma2_9bIt => write!(f, "gemma2-9b-it"),
        }
    }
}

impl FromStr for Model {
    type Err = UnknownModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "llama3-8b-8192" => Ok(Model::Known(KnownModel::Llama3_8b)),
            "mixtral-8x7b-32768" => Ok(Model::Known(KnownModel::Mixtral8x7b)),
            "gemma2-9b-it" => Ok(Model::Known(KnownModel::Gemma2_9bIt)),
            _ => Err(UnknownModelError {
                identifier: s.to_string(),
            }),
        }
    }
}

/// Error returned when a model identifier does not name a known model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModelError {
    /// The identifier that failed to parse.
    pub identifier: String,
}

impl fmt::Display for UnknownModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown model identifier: {}", self.identifier)
    }
}

impl std::error::Error for UnknownModelError {}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Model::Custom(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        Model::Custom(model.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_model_serialization() {
        let model = Model::Known(KnownModel::Llama3_8b);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""llama3-8b-8192""#);

        let model = Model::Known(KnownModel::Mixtral8x7b);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""mixtral-8x7b-32768""#);
    }

    #[test]
    fn custom_model_serialization() {
        let model = Model::Custom("llama-3.1-70b-versatile".to_string());
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""llama-3.1-70b-versatile""#);
    }

    #[test]
    fn model_display() {
        assert_eq!(
            Model::Known(KnownModel::Gemma2_9bIt).to_string(),
            "gemma2-9b-it"
        );
        assert_eq!(Model::Custom("whatever".to_string()).to_string(), "whatever");
    }

    #[test]
    fn model_from_str() {
        assert_eq!(
            "llama3-8b-8192".parse::<Model>().unwrap(),
            Model::Known(KnownModel::Llama3_8b)
        );
        assert_eq!(
            "gemma2-9b-it".parse::<Model>().unwrap(),
            Model::Known(KnownModel::Gemma2_9bIt)
        );
        assert!("not-a-model".parse::<Model>().is_err());
    }

    #[test]
    fn default_model() {
        assert_eq!(Model::default(), Model::Known(KnownModel::Llama3_8b));
    }
}
