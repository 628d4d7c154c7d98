//! Session-scoped API credential.

use std::fmt;

use crate::error::{FinAgentError, Result};

/// An opaque API key held in memory for one session.
///
/// There is no `Serialize` impl and `Debug`/`Display` are redacted, so a
/// credential cannot end up in a config file or a log line by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Accept a user-supplied key. Fails when it is empty or whitespace-only.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FinAgentError::Validation(
                "API key is required to create the finance agent.".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw key, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}
