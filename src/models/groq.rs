//! Groq model definitions.

use super::capabilities::ModelCapabilities;

/// Groq-hosted models the agent can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroqModel {
    #[default]
    Llama3370bVersatile,
}

impl GroqModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Llama3370bVersatile => "llama-3.3-70b-versatile",
        }
    }

    pub fn capabilities(&self) -> ModelCapabilities {
        match self {
            Self::Llama3370bVersatile => ModelCapabilities {
                supports_tools: true,
                max_output_tokens: Some(32_768),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_supports_tools() {
        let model = GroqModel::default();
        assert_eq!(model.as_str(), "llama-3.3-70b-versatile");
        assert!(model.capabilities().supports_tools);
    }
}
