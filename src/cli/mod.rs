//! Command-line front-end.

pub mod chat;

use clap::{Args, Parser, Subcommand};

/// Finance agent CLI
#[derive(Parser, Debug)]
#[command(
    name = "finagent",
    version,
    about = "Real-time financial analysis with a Groq-backed agent"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a single question and print the answer
    Ask(AskArgs),
    /// Interactive question loop with session history
    Chat(CredentialArgs),
    /// List the built-in sample questions
    Questions,
    /// Serve the web form
    Serve(ServeArgs),
}

/// API key source shared by commands that talk to the model.
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// Groq API key (never stored)
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for `finagent ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub credential: CredentialArgs,

    /// Quick lookup for a ticker instead of a free-text question (price, analysis)
    #[arg(long, value_name = "KIND", requires = "symbol")]
    pub lookup: Option<String>,

    /// Ticker used with --lookup
    #[arg(long)]
    pub symbol: Option<String>,

    /// The question
    #[arg(required_unless_present = "lookup")]
    pub question: Option<String>,
}

/// Arguments for `finagent serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind, overriding config
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
