//! OpenAI-style Chat Completions client, used for Groq.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::credential::Credential;
use crate::error::{FinAgentError, Result};
use crate::models::capabilities::ModelCapabilities;
use crate::types::*;

use super::http::{bearer_headers, status_to_error};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub struct ChatCompletionsProvider {
    model_id: String,
    capabilities: ModelCapabilities,
    credential: Credential,
    base_url: String,
    client: reqwest::Client,
}

impl ChatCompletionsProvider {
    pub fn new(
        model_id: impl Into<String>,
        capabilities: ModelCapabilities,
        credential: Credential,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            capabilities,
            credential,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub(crate) fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_wire)
            .collect::<Vec<_>>();

        let mut body = serde_json::Map::new();
        body.insert("model".into(), self.model_id.clone().into());
        body.insert("messages".into(), messages.into());
        body.insert("stream".into(), false.into());

        if let Some(max) = request.settings.max_tokens {
            let max = self.capabilities.max_output_tokens.map_or(max, |cap| max.min(cap));
            body.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = request.settings.temperature {
            body.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = request.settings.top_p {
            body.insert("top_p".into(), top_p.into());
        }
        if let Some(ref stops) = request.settings.stop_sequences {
            body.insert("stop".into(), serde_json::json!(stops));
        }
        if let Some(seed) = request.settings.seed {
            body.insert("seed".into(), seed.into());
        }

        if let Some(ref tools) = request.tools {
            if !tools.is_empty() {
                let tool_defs: Vec<serde_json::Value> = tools
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "type": "function",
                            "function": {
                                "name": t.name,
                                "description": t.description,
                                "parameters": t.parameters,
                            }
                        })
                    })
                    .collect();
                body.insert("tools".into(), tool_defs.into());
            }
        }

        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl ModelProvider for ChatCompletionsProvider {
    fn provider_name(&self) -> &str {
        "openai-compatible"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model_id, messages = request.messages.len(), "chat completion");

        let resp = self
            .client
            .post(&url)
            .headers(bearer_headers(self.credential.expose()))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let raw = resp.text().await?;
        let data: ChatResponse = serde_json::from_str(&raw)?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| FinAgentError::api(200, "No choices in chat completion response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| AgentToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(serde_json::Value::String(tc.function.arguments)),
            })
            .collect();

        let finish_reason = choice.finish_reason.as_deref().and_then(parse_finish_reason);

        Ok(ProviderResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            tool_calls,
            finish_reason,
        })
    }

    async fn verify_credentials(&self) -> Result<()> {
        let url = format!("{}/models", self.base_url);
        debug!(model = %self.model_id, "verifying credentials");

        let resp = self
            .client
            .get(&url)
            .headers(bearer_headers(self.credential.expose()))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }
        Ok(())
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

fn message_to_wire(msg: &ModelMessage) -> serde_json::Value {
    if let Some(ContentPart::ToolResult(tr)) = msg.content.first() {
        return serde_json::json!({
            "role": "tool",
            "tool_call_id": tr.tool_call_id,
            "content": tr.result.to_string(),
        });
    }

    let tool_calls = msg.tool_calls();
    if !tool_calls.is_empty() {
        let tc_json: Vec<serde_json::Value> = tool_calls
            .iter()
            .map(|tc| {
                serde_json::json!({
                    "id": tc.id,
                    "type": "function",
                    "function": {
                        "name": tc.name,
                        "arguments": tc.arguments.to_string(),
                    }
                })
            })
            .collect();
        let text = msg.text();
        let content = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::Value::String(text)
        };
        return serde_json::json!({
            "role": msg.role.to_string(),
            "content": content,
            "tool_calls": tc_json,
        });
    }

    serde_json::json!({ "role": msg.role.to_string(), "content": msg.text() })
}

// Wire response types (internal)

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunction,
}

#[derive(Deserialize)]
struct ChatFunction {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
