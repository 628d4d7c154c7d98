//! Agent construction from a user-supplied credential.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::FinAgentConfig;
use crate::credential::Credential;
use crate::error::Result;
use crate::models::groq::GroqModel;
use crate::provider::groq::GroqProvider;
use crate::tools::finance_agent_tools;
use crate::types::GenerationSettings;

use super::handle::{AgentHandle, FinanceAgent};

/// Turns a raw credential into a ready agent handle.
#[async_trait]
pub trait AgentFactory: Send + Sync {
    async fn build(&self, credential: &str) -> Result<Arc<dyn AgentHandle>>;
}

/// Assemble the finance agent without contacting the provider.
///
/// Fails with a validation error when the credential is blank.
pub fn build_agent(credential: &str, config: &FinAgentConfig) -> Result<FinanceAgent> {
    let credential = Credential::new(credential)?;
    let client = config.http_client()?;
    let provider = GroqProvider::new(
        GroqModel::default(),
        credential,
        config.groq_base_url.clone(),
        client.clone(),
    );
    let tools = finance_agent_tools(config, &client);
    let settings = GenerationSettings::builder().temperature(0.2).build();
    Ok(FinanceAgent::new(Box::new(provider), tools).with_settings(settings))
}

/// Builds Groq-backed agents and confirms the key with one provider call.
#[derive(Debug, Clone, Default)]
pub struct GroqAgentFactory {
    config: FinAgentConfig,
}

impl GroqAgentFactory {
    pub fn new(config: FinAgentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FinAgentConfig {
        &self.config
    }
}

#[async_trait]
impl AgentFactory for GroqAgentFactory {
    async fn build(&self, credential: &str) -> Result<Arc<dyn AgentHandle>> {
        let agent = build_agent(credential, &self.config)?;
        agent.provider().verify_credentials().await?;
        info!(
            provider = agent.provider().provider_name(),
            model = agent.provider().model_id(),
            "finance agent ready"
        );
        Ok(Arc::new(agent))
    }
}
