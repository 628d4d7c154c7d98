//! finagent: a Groq-backed finance question agent.
//!
//! Builds an agent from a user-supplied API key, binds it to quote lookup
//! and web search tools, and answers natural-language finance questions.
//! Responses of any shape are normalized to display text and recorded in
//! a per-session history. A web form and a CLI sit on top.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use finagent::prelude::*;
//!
//! # async fn example() -> finagent::error::Result<()> {
//! let factory = GroqAgentFactory::new(FinAgentConfig::load()?);
//! let mut session = Session::new(Arc::new(factory));
//! session.set_credential("gsk_...").await?;
//! let entry = session.ask("What is the current stock price of Apple (AAPL)?").await?;
//! println!("{}", entry.response.normalize());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod credential;
pub mod error;
pub mod generation;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod questions;
pub mod session;
pub mod tools;
pub mod types;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;
