//! Groq provider (OpenAI-compatible).

use async_trait::async_trait;

use crate::credential::Credential;
use crate::error::Result;
use crate::models::capabilities::ModelCapabilities;
use crate::models::groq::GroqModel;

use super::chat_completions::ChatCompletionsProvider;
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub struct GroqProvider {
    inner: ChatCompletionsProvider,
}

impl GroqProvider {
    pub fn new(
        model: GroqModel,
        credential: Credential,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            inner: ChatCompletionsProvider::new(
                model.as_str(),
                model.capabilities(),
                credential,
                base_url,
                client,
            ),
        }
    }
}

#[async_trait]
impl ModelProvider for GroqProvider {
    fn provider_name(&self) -> &str {
        "groq"
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    fn capabilities(&self) -> &ModelCapabilities {
        self.inner.capabilities()
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        self.inner.generate_text(request).await
    }
    async fn verify_credentials(&self) -> Result<()> {
        self.inner.verify_credentials().await
    }
}
