//! The finance agent: construction, query dispatch and response shapes.

pub mod factory;
pub mod handle;
pub mod response;

pub use factory::{build_agent, AgentFactory, GroqAgentFactory};
pub use handle::{AgentHandle, FinanceAgent, FINANCE_INSTRUCTIONS};
pub use response::{AgentResponse, ResponseMessage};
