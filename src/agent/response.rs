//! Variable-shape agent responses and their normalization to display text.

use std::fmt;

use serde::Serialize;

use crate::types::{ContentPart, GenerateTextResult, Role};

/// A response returned by an agent run.
///
/// The agent may answer with final text, with only a transcript of
/// sub-messages, or with something else entirely; each shape is a variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AgentResponse {
    DirectText(String),
    MessageList(Vec<ResponseMessage>),
    Opaque(serde_json::Value),
}

/// One sub-message of a [`AgentResponse::MessageList`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub content: Option<String>,
}

impl ResponseMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            role: None,
            content: Some(content.into()),
        }
    }
}

impl AgentResponse {
    /// Displayable text for this response.
    ///
    /// Prefers non-empty direct text, then the in-order concatenation of the
    /// non-empty sub-message texts, and otherwise falls back to the generic
    /// string form of the whole response. The result is never empty, so
    /// `AgentResponse::DirectText(r.normalize()).normalize() == r.normalize()`.
    ///
    /// A non-empty list whose texts are all empty deliberately yields the
    /// generic form rather than an empty concatenation.
    pub fn normalize(&self) -> String {
        match self {
            Self::DirectText(text) if !text.is_empty() => text.clone(),
            Self::MessageList(messages) if !messages.is_empty() => {
                let joined: String = messages
                    .iter()
                    .filter_map(|m| m.content.as_deref())
                    .filter(|c| !c.is_empty())
                    .collect();
                if joined.is_empty() {
                    self.generic_string()
                } else {
                    joined
                }
            }
            _ => self.generic_string(),
        }
    }

    fn generic_string(&self) -> String {
        match self {
            Self::Opaque(value) => value.to_string(),
            other => serde_json::to_string(other).unwrap_or_else(|_| format!("{other:?}")),
        }
    }

    /// Shape a generation result: final text if any, else the assistant and
    /// tool transcript, else the raw result.
    pub fn from_generation(result: &GenerateTextResult) -> Self {
        if !result.text.is_empty() {
            return Self::DirectText(result.text.clone());
        }

        let transcript: Vec<ResponseMessage> = result
            .messages
            .iter()
            .filter(|m| matches!(m.role, Role::Assistant | Role::Tool))
            .map(|m| {
                let content = match m.content.first() {
                    Some(ContentPart::ToolResult(tr)) => Some(tr.result.to_string()),
                    _ => Some(m.text()).filter(|t| !t.is_empty()),
                };
                ResponseMessage {
                    role: Some(m.role.to_string()),
                    content,
                }
            })
            .collect();

        if !transcript.is_empty() {
            return Self::MessageList(transcript);
        }

        match serde_json::to_value(result) {
            Ok(value) => Self::Opaque(value),
            Err(e) => Self::Opaque(serde_json::Value::String(e.to_string())),
        }
    }
}

impl fmt::Display for AgentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalize())
    }
}
