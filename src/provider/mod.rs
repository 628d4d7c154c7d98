//! Model provider trait and the Groq implementation.

pub mod chat_completions;
pub mod groq;
pub mod http;

pub use chat_completions::ChatCompletionsProvider;
pub use groq::GroqProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::capabilities::ModelCapabilities;
use crate::types::{AgentToolCall, FinishReason, GenerationSettings, ModelMessage, Usage};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "groq").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    fn capabilities(&self) -> &ModelCapabilities;

    /// Generate text (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse>;

    /// Make one authenticated call that proves the credential is accepted.
    async fn verify_credentials(&self) -> Result<()>;
}
