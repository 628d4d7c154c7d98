//! Web search tool backed by the DuckDuckGo instant-answer API.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::FinAgentError;
use crate::provider::http::status_to_error;
use crate::tools::tool::{AgentTool, Tool, ToolExecutionContext};
use crate::tools::types::AgentToolParameters;

pub const WEB_SEARCH_TOOL: &str = "duckduckgo_search";

const DEFAULT_MAX_RESULTS: usize = 5;
const MAX_RESULTS_CAP: usize = 20;

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
    max_results: Option<usize>,
}

/// Create the `duckduckgo_search` tool.
pub fn web_search_tool(client: reqwest::Client, base_url: &str) -> Arc<dyn Tool> {
    let base_url = base_url.trim_end_matches('/').to_string();
    Arc::new(AgentTool::new(
        WEB_SEARCH_TOOL,
        "Search the web with DuckDuckGo for financial news and background information",
        AgentToolParameters::object()
            .string("query", "The search query", true)
            .integer("max_results", "Maximum number of results (default 5)", false)
            .build(),
        move |args, _ctx: ToolExecutionContext| {
            let client = client.clone();
            let base_url = base_url.clone();
            async move {
                let args: SearchArgs = args.deserialize()?;
                let query = args.query.trim().to_string();
                if query.is_empty() {
                    return Err(FinAgentError::InvalidArgument(
                        "search query must not be empty".into(),
                    ));
                }
                let max_results = args
                    .max_results
                    .unwrap_or(DEFAULT_MAX_RESULTS)
                    .clamp(1, MAX_RESULTS_CAP);

                debug!(tool = WEB_SEARCH_TOOL, %query, max_results, "searching");

                let resp = client
                    .get(format!("{base_url}/"))
                    .query(&[
                        ("q", query.as_str()),
                        ("format", "json"),
                        ("no_html", "1"),
                        ("skip_disambig", "1"),
                    ])
                    .send()
                    .await?;

                let status = resp.status().as_u16();
                let body = resp.text().await?;
                if status != 200 {
                    return Err(status_to_error(status, &body));
                }

                // Served as application/x-javascript, so decode from text.
                let answer: InstantAnswer = serde_json::from_str(&body)?;
                Ok(answer.into_results(&query, max_results))
            }
        },
    ))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    abstract_url: String,
    #[serde(default)]
    abstract_source: String,
    #[serde(default)]
    related_topics: Vec<RelatedTopic>,
}

/// Related topics are either a hit or a named group of hits.
#[derive(Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Hit {
        #[serde(rename = "Text")]
        text: String,
        #[serde(rename = "FirstURL")]
        first_url: String,
    },
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
}

impl RelatedTopic {
    fn flatten_into<'a>(&'a self, out: &mut Vec<(&'a str, &'a str)>) {
        match self {
            Self::Hit { text, first_url } => out.push((text.as_str(), first_url.as_str())),
            Self::Group { topics } => topics.iter().for_each(|t| t.flatten_into(out)),
        }
    }
}

impl InstantAnswer {
    fn into_results(self, query: &str, max_results: usize) -> serde_json::Value {
        let mut hits = Vec::new();
        for topic in &self.related_topics {
            topic.flatten_into(&mut hits);
        }

        let results: Vec<serde_json::Value> = hits
            .into_iter()
            .take(max_results)
            .map(|(text, url)| {
                let title = text.split(" - ").next().unwrap_or(text);
                serde_json::json!({ "title": title, "url": url, "snippet": text })
            })
            .collect();

        let summary = (!self.abstract_text.is_empty()).then(|| {
            serde_json::json!({
                "heading": self.heading,
                "text": self.abstract_text,
                "url": self.abstract_url,
                "source": self.abstract_source,
            })
        });

        serde_json::json!({
            "query": query,
            "summary": summary,
            "results": results,
        })
    }
}
