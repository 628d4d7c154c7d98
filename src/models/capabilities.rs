//! Model capabilities descriptor.

use serde::{Deserialize, Serialize};

/// Describes what a model can do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ModelCapabilities {
    pub supports_tools: bool,
    /// Upper bound for `max_tokens`; requests above it are clamped.
    pub max_output_tokens: Option<u32>,
}
