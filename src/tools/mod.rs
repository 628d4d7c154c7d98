//! Tool system for function calling, plus the finance and search tools.

pub mod arguments;
pub mod finance;
pub mod search;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use tool::{AgentTool, Tool, ToolExecutionContext};
pub use types::AgentToolParameters;

use std::sync::Arc;

use crate::config::FinAgentConfig;

/// The fixed tool bindings of the finance agent: quote lookup and web search.
pub fn finance_agent_tools(
    config: &FinAgentConfig,
    client: &reqwest::Client,
) -> Vec<Arc<dyn Tool>> {
    vec![
        finance::current_price_tool(client.clone(), &config.yahoo_base_url),
        finance::historical_prices_tool(client.clone(), &config.yahoo_base_url),
        search::web_search_tool(client.clone(), &config.search_base_url),
    ]
}
