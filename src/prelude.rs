//! Convenience re-exports for common use.

pub use crate::agent::{build_agent, AgentFactory, AgentHandle, AgentResponse, GroqAgentFactory};
pub use crate::config::FinAgentConfig;
pub use crate::credential::Credential;
pub use crate::error::{FinAgentError, Result};
pub use crate::provider::ModelProvider;
pub use crate::session::{History, HistoryEntry, Session};
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments};
pub use crate::types::{GenerationSettings, ModelMessage, Role};
