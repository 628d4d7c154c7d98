//! Stock quote tools backed by the Yahoo Finance chart API.
//!
//! Both tools hit `GET {base}/v8/finance/chart/{SYMBOL}`; the current-price
//! tool asks for a one-day range and reads the quote metadata, the
//! historical tool reads the close series for the requested range.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{FinAgentError, Result};
use crate::provider::http::status_to_error;
use crate::tools::tool::{AgentTool, Tool, ToolExecutionContext};
use crate::tools::types::AgentToolParameters;

pub const CURRENT_PRICE_TOOL: &str = "get_current_stock_price";
pub const HISTORICAL_PRICES_TOOL: &str = "get_historical_stock_prices";

const PERIODS: &[&str] = &["1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max"];
const INTERVALS: &[&str] = &["1m", "5m", "15m", "30m", "1h", "1d", "1wk", "1mo"];

/// Trim and upper-case a ticker.
///
/// Only `A-Z`, `0-9` and `. ^ = -` are accepted (`BRK-B`, `^GSPC`,
/// `EURUSD=X`), so a symbol can never alter the request path or query.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(FinAgentError::InvalidArgument("stock symbol must not be empty".into()));
    }
    let allowed = |c: char| c.is_ascii_uppercase() || c.is_ascii_digit() || ".^=-".contains(c);
    if !symbol.chars().all(allowed) {
        return Err(FinAgentError::InvalidArgument(format!(
            "invalid stock symbol: {}",
            raw.trim()
        )));
    }
    Ok(symbol)
}

fn chart_url(base_url: &str, symbol: &str) -> Result<reqwest::Url> {
    let invalid = || FinAgentError::Configuration(format!("invalid Yahoo base URL: {base_url}"));
    let mut url = reqwest::Url::parse(base_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(["v8", "finance", "chart", symbol]);
    Ok(url)
}

#[derive(Deserialize)]
struct CurrentPriceArgs {
    symbol: String,
}

#[derive(Deserialize)]
struct HistoricalArgs {
    symbol: String,
    period: Option<String>,
    interval: Option<String>,
}

/// Create the `get_current_stock_price` tool.
pub fn current_price_tool(client: reqwest::Client, base_url: &str) -> Arc<dyn Tool> {
    let base_url = base_url.trim_end_matches('/').to_string();
    Arc::new(AgentTool::new(
        CURRENT_PRICE_TOOL,
        "Get the current stock price and quote details for a ticker symbol",
        AgentToolParameters::object()
            .string("symbol", "Ticker symbol, e.g. AAPL", true)
            .build(),
        move |args, _ctx: ToolExecutionContext| {
            let client = client.clone();
            let base_url = base_url.clone();
            async move {
                let args: CurrentPriceArgs = args.deserialize()?;
                let symbol = normalize_symbol(&args.symbol)?;
                let chart =
                    fetch_chart(&client, &base_url, &symbol, "1d", "1d", CURRENT_PRICE_TOOL)
                        .await?;
                let meta = chart.meta;
                let price = meta.regular_market_price.ok_or_else(|| {
                    FinAgentError::tool(CURRENT_PRICE_TOOL, format!("no market price for {symbol}"))
                })?;

                Ok(serde_json::json!({
                    "symbol": meta.symbol.unwrap_or(symbol),
                    "price": price,
                    "currency": meta.currency,
                    "previous_close": meta.chart_previous_close.or(meta.previous_close),
                    "exchange": meta.exchange_name,
                }))
            }
        },
    ))
}

/// Create the `get_historical_stock_prices` tool.
pub fn historical_prices_tool(client: reqwest::Client, base_url: &str) -> Arc<dyn Tool> {
    let base_url = base_url.trim_end_matches('/').to_string();
    Arc::new(AgentTool::new(
        HISTORICAL_PRICES_TOOL,
        "Get historical closing prices for a ticker symbol over a period",
        AgentToolParameters::object()
            .string("symbol", "Ticker symbol, e.g. MSFT", true)
            .string_enum("period", "Range to cover (default 1mo)", PERIODS, false)
            .string_enum("interval", "Sampling interval (default 1d)", INTERVALS, false)
            .build(),
        move |args, _ctx: ToolExecutionContext| {
            let client = client.clone();
            let base_url = base_url.clone();
            async move {
                let args: HistoricalArgs = args.deserialize()?;
                let symbol = normalize_symbol(&args.symbol)?;
                let period = args.period.unwrap_or_else(|| "1mo".to_string());
                let interval = args.interval.unwrap_or_else(|| "1d".to_string());
                if !PERIODS.contains(&period.as_str()) {
                    return Err(FinAgentError::InvalidArgument(format!(
                        "unsupported period: {period}"
                    )));
                }
                if !INTERVALS.contains(&interval.as_str()) {
                    return Err(FinAgentError::InvalidArgument(format!(
                        "unsupported interval: {interval}"
                    )));
                }

                let chart = fetch_chart(
                    &client,
                    &base_url,
                    &symbol,
                    &period,
                    &interval,
                    HISTORICAL_PRICES_TOOL,
                )
                .await?;
                let closes = chart
                    .indicators
                    .quote
                    .into_iter()
                    .next()
                    .map(|q| q.close)
                    .unwrap_or_default();

                let points: Vec<serde_json::Value> = chart
                    .timestamp
                    .iter()
                    .zip(closes)
                    .filter_map(|(ts, close)| {
                        let close = close?;
                        let at = Utc.timestamp_opt(*ts, 0).single()?;
                        Some(serde_json::json!({
                            "timestamp": at.to_rfc3339(),
                            "close": close,
                        }))
                    })
                    .collect();

                Ok(serde_json::json!({
                    "symbol": symbol,
                    "currency": chart.meta.currency,
                    "period": period,
                    "interval": interval,
                    "prices": points,
                }))
            }
        },
    ))
}

async fn fetch_chart(
    client: &reqwest::Client,
    base_url: &str,
    symbol: &str,
    range: &str,
    interval: &str,
    tool_name: &str,
) -> Result<ChartResult> {
    let url = chart_url(base_url, symbol)?;
    debug!(tool = tool_name, %symbol, range, interval, "fetching chart");

    let resp = client
        .get(url)
        .query(&[("range", range), ("interval", interval)])
        .send()
        .await?;

    let status = resp.status().as_u16();
    let body = resp.text().await?;

    // Yahoo reports unknown symbols as 404 with a structured error body.
    let parsed: Option<ChartEnvelope> = serde_json::from_str(&body).ok();
    if let Some(err) = parsed.as_ref().and_then(|p| p.chart.error.as_ref()) {
        return Err(FinAgentError::tool(
            tool_name,
            format!("{symbol}: {}", err.description.as_deref().unwrap_or(&err.code)),
        ));
    }
    if status != 200 {
        return Err(status_to_error(status, &body));
    }

    let envelope = match parsed {
        Some(envelope) => envelope,
        None => serde_json::from_str::<ChartEnvelope>(&body)?,
    };
    envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| FinAgentError::tool(tool_name, format!("no chart data for {symbol}")))
}

#[derive(Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: Option<String>,
    currency: Option<String>,
    exchange_name: Option<String>,
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    previous_close: Option<f64>,
}

#[derive(Deserialize, Default)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
