//! A user session: credential, agent handle and history.

pub mod history;

pub use history::{History, HistoryEntry};

use std::sync::Arc;

use tracing::{info, warn};

use crate::agent::{AgentFactory, AgentHandle, AgentResponse};
use crate::error::{FinAgentError, Result};

/// State for one user of the form or the REPL.
///
/// The handle is created once per credential and reused for every query.
/// Nothing here is persisted; dropping the session discards it all.
pub struct Session {
    factory: Arc<dyn AgentFactory>,
    agent: Option<Arc<dyn AgentHandle>>,
    history: History,
}

impl Session {
    pub fn new(factory: Arc<dyn AgentFactory>) -> Self {
        Self {
            factory,
            agent: None,
            history: History::new(),
        }
    }

    /// Validate a credential by building an agent with it.
    ///
    /// On failure any previously accepted credential is dropped.
    pub async fn set_credential(&mut self, credential: &str) -> Result<()> {
        self.agent = None;
        match self.factory.build(credential).await {
            Ok(agent) => {
                info!(model = agent.model_id(), "credential accepted");
                self.agent = Some(agent);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "credential rejected");
                Err(e)
            }
        }
    }

    pub fn has_credential(&self) -> bool {
        self.agent.is_some()
    }

    /// Check that `question` can be asked and return the agent to run it.
    ///
    /// Lets a caller run the agent without holding the session; pair with
    /// [`Session::record`].
    pub fn prepare(&self, question: &str) -> Result<Arc<dyn AgentHandle>> {
        if question.trim().is_empty() {
            return Err(FinAgentError::Validation("question must not be empty".into()));
        }
        self.agent.clone().ok_or_else(|| {
            FinAgentError::Validation("enter your API key before asking a question".into())
        })
    }

    /// Append a finished exchange.
    pub fn record(&mut self, question: &str, response: AgentResponse) -> &HistoryEntry {
        self.history.push(question, response)
    }

    /// Ask one question. On success exactly one entry is appended with the
    /// question as given; on failure history is unchanged.
    pub async fn ask(&mut self, question: &str) -> Result<&HistoryEntry> {
        let agent = self.prepare(question)?;
        let response = agent.run(question).await?;
        Ok(self.record(question, response))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_credential", &self.has_credential())
            .field("history_len", &self.history.len())
            .finish()
    }
}
