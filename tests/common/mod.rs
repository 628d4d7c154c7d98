//! Shared test helpers: a scripted provider, a canned agent and a
//! counting factory.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use finagent::agent::{AgentFactory, AgentHandle, AgentResponse};
use finagent::config::FinAgentConfig;
use finagent::credential::Credential;
use finagent::error::{FinAgentError, Result};
use finagent::models::capabilities::ModelCapabilities;
use finagent::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use finagent::types::*;

/// A provider that replays queued responses and records every request.
pub struct MockProvider {
    model_id: String,
    capabilities: ModelCapabilities,
    responses: Mutex<VecDeque<Result<ProviderResponse>>>,
    pub requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            capabilities: ModelCapabilities {
                supports_tools: true,
                ..ModelCapabilities::default()
            },
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose model cannot call tools.
    pub fn without_tool_support(model_id: &str) -> Self {
        let mut provider = Self::new(model_id);
        provider.capabilities.supports_tools = false;
        provider
    }

    /// Queue a final text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push_back(Ok(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        }));
    }

    /// Queue a response asking for one tool call.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.responses.lock().unwrap().push_back(Ok(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: vec![AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: args,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        }));
    }

    /// Queue a provider failure.
    pub fn queue_error(&self, err: FinAgentError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FinAgentError::api(500, "mock provider exhausted")))
    }

    async fn verify_credentials(&self) -> Result<()> {
        Ok(())
    }
}

/// An agent whose replies are scripted per call.
pub struct MockAgent {
    replies: Mutex<VecDeque<Result<AgentResponse>>>,
    pub queries: Mutex<Vec<String>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(&self, response: AgentResponse) {
        self.replies.lock().unwrap().push_back(Ok(response));
    }

    pub fn fail(&self, err: FinAgentError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }
}

#[async_trait]
impl AgentHandle for MockAgent {
    fn model_id(&self) -> &str {
        "mock-model"
    }

    fn tool_names(&self) -> Vec<String> {
        vec![]
    }

    async fn run(&self, query: &str) -> Result<AgentResponse> {
        self.queries.lock().unwrap().push(query.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AgentResponse::DirectText(format!("answer to: {query}"))))
    }
}

/// A factory that accepts any non-blank credential except `rejected`
/// and hands out one shared [`MockAgent`].
pub struct MockFactory {
    pub agent: Arc<MockAgent>,
    pub builds: AtomicUsize,
    rejected: String,
}

impl MockFactory {
    pub fn new() -> Self {
        Self {
            agent: Arc::new(MockAgent::new()),
            builds: AtomicUsize::new(0),
            rejected: "sk_invalid".to_string(),
        }
    }

    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentFactory for MockFactory {
    async fn build(&self, credential: &str) -> Result<Arc<dyn AgentHandle>> {
        let credential = Credential::new(credential)?;
        self.builds.fetch_add(1, Ordering::SeqCst);
        if credential.expose() == self.rejected {
            return Err(FinAgentError::Authentication("Invalid API Key".into()));
        }
        Ok(self.agent.clone())
    }
}

/// Config whose upstreams all point at one mock server.
pub fn config_for(base: &str) -> FinAgentConfig {
    FinAgentConfig {
        groq_base_url: base.to_string(),
        yahoo_base_url: base.to_string(),
        search_base_url: base.to_string(),
        ..FinAgentConfig::default()
    }
}

/// A Yahoo chart body with one quote.
pub fn chart_body(symbol: &str, price: f64) -> serde_json::Value {
    serde_json::json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": symbol,
                    "currency": "USD",
                    "exchangeName": "NMS",
                    "regularMarketPrice": price,
                    "chartPreviousClose": price - 1.0
                },
                "timestamp": [1_700_000_000, 1_700_086_400],
                "indicators": {"quote": [{"close": [price - 1.0, price]}]}
            }],
            "error": null
        }
    })
}
