//! Agent handle: one model, fixed instructions, fixed tools.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info_span, Instrument};

use crate::error::{FinAgentError, Result};
use crate::generation::generate_text;
use crate::provider::ModelProvider;
use crate::tools::tool::Tool;
use crate::types::{GenerationSettings, ModelMessage};

use super::response::AgentResponse;

/// System instructions given to the finance agent on every run.
pub const FINANCE_INSTRUCTIONS: &str = "You are a professional finance assistant. \
Provide clear, accurate financial information with proper formatting. \
Use bullet points for key information, tables when appropriate, \
and always cite your sources. Be helpful and informative.";

/// Something that can answer a natural-language query.
#[async_trait]
pub trait AgentHandle: Send + Sync {
    /// Model identifier the handle is configured with.
    fn model_id(&self) -> &str;

    /// Names of the tools bound to the handle.
    fn tool_names(&self) -> Vec<String>;

    /// Run one query to completion.
    async fn run(&self, query: &str) -> Result<AgentResponse>;
}

impl std::fmt::Debug for dyn AgentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentHandle")
            .field("model_id", &self.model_id())
            .field("tool_names", &self.tool_names())
            .finish()
    }
}

/// The production agent handle.
///
/// Each run is independent: the model sees the instructions and the single
/// query, never earlier session history.
pub struct FinanceAgent {
    provider: Box<dyn ModelProvider>,
    instructions: String,
    tools: Vec<Arc<dyn Tool>>,
    settings: GenerationSettings,
}

impl FinanceAgent {
    pub fn new(provider: Box<dyn ModelProvider>, tools: Vec<Arc<dyn Tool>>) -> Self {
        Self {
            provider,
            instructions: FINANCE_INSTRUCTIONS.to_string(),
            tools,
            settings: GenerationSettings::default(),
        }
    }

    /// Set generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn provider(&self) -> &dyn ModelProvider {
        self.provider.as_ref()
    }
}

#[async_trait]
impl AgentHandle for FinanceAgent {
    fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    async fn run(&self, query: &str) -> Result<AgentResponse> {
        if query.trim().is_empty() {
            return Err(FinAgentError::Validation("question must not be empty".into()));
        }

        let messages = vec![
            ModelMessage::system(self.instructions.clone()),
            ModelMessage::user(query),
        ];

        let span = info_span!(
            "agent_run",
            provider = self.provider.provider_name(),
            model = self.provider.model_id()
        );
        let settings = self.settings.clone();
        let result = generate_text(self.provider.as_ref(), messages, settings, &self.tools)
            .instrument(span)
            .await?;

        debug!(
            steps = result.steps.len(),
            total_tokens = result.usage.total_tokens,
            "agent run finished"
        );
        Ok(AgentResponse::from_generation(&result))
    }
}

impl std::fmt::Debug for FinanceAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceAgent")
            .field("model", &self.provider.model_id())
            .field("tools", &self.tool_names())
            .finish()
    }
}
