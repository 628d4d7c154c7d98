//! Canned questions and quick-lookup templates offered by the front-ends.

use strum::{Display, EnumString};

pub const STOCK_QUESTIONS: &[&str] = &[
    "What is the current stock price of Apple (AAPL)?",
    "What is the current stock price of Tesla (TSLA)?",
    "What is the current stock price of Microsoft (MSFT)?",
    "Compare Apple and Microsoft stock performance",
    "Show me Ford (F) stock information",
];

pub const MARKET_QUESTIONS: &[&str] = &[
    "What are the latest tech stock trends?",
    "Analyze the S&P 500 index performance today",
    "What are the top performing stocks this week?",
    "Tell me about recent market volatility",
    "What's happening in the cryptocurrency market?",
];

/// Quick ticker lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum QuickLookup {
    Price,
    Analysis,
}

impl QuickLookup {
    /// Render the question for a ticker, or `None` when the ticker is blank.
    pub fn question(self, symbol: &str) -> Option<String> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return None;
        }
        Some(match self {
            Self::Price => {
                format!("What is the current stock price and key information for {symbol}?")
            }
            Self::Analysis => format!(
                "Provide a comprehensive analysis of {symbol} including price, performance, and recent news"
            ),
        })
    }
}

/// Every canned question, stock questions first.
pub fn all_questions() -> impl Iterator<Item = &'static str> {
    STOCK_QUESTIONS.iter().chain(MARKET_QUESTIONS).copied()
}

/// Whether `question` is one of the canned questions.
pub fn is_catalog_question(question: &str) -> bool {
    all_questions().any(|q| q == question)
}
