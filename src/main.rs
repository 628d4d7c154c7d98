//! finagent CLI binary entry point.

use std::sync::Arc;

use finagent::cli::{chat, AskArgs, Cli, Commands, CredentialArgs, ServeArgs};
use finagent::prelude::*;
use finagent::questions::QuickLookup;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    let result = match FinAgentConfig::load() {
        Ok(config) => match cli.command {
            Commands::Ask(args) => handle_ask(args, config).await,
            Commands::Chat(args) => handle_chat(args, config).await,
            Commands::Questions => {
                print!("{}", chat::render_questions());
                Ok(())
            }
            Commands::Serve(args) => handle_serve(args, config).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn require_key(args: CredentialArgs) -> Result<String> {
    args.api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            FinAgentError::Validation(
                "API key is required: pass --api-key or set GROQ_API_KEY".into(),
            )
        })
}

async fn start_session(args: CredentialArgs, config: FinAgentConfig) -> Result<Session> {
    let key = require_key(args)?;
    let mut session = Session::new(Arc::new(GroqAgentFactory::new(config)));
    session.set_credential(&key).await?;
    Ok(session)
}

async fn handle_ask(args: AskArgs, config: FinAgentConfig) -> Result<()> {
    let question = match (&args.lookup, &args.symbol, &args.question) {
        (Some(kind), Some(symbol), _) => {
            let lookup: QuickLookup = kind.parse().map_err(|_| {
                FinAgentError::InvalidArgument(format!(
                    "unknown lookup '{kind}', use price or analysis"
                ))
            })?;
            lookup
                .question(symbol)
                .ok_or_else(|| FinAgentError::Validation("Please enter a stock symbol.".into()))?
        }
        (_, _, Some(question)) => question.clone(),
        _ => return Err(FinAgentError::Validation("Please enter a question.".into())),
    };

    let mut session = start_session(args.credential, config).await?;
    let entry = session.ask(&question).await?;
    println!("{}", entry.response.normalize());
    Ok(())
}

async fn handle_chat(args: CredentialArgs, config: FinAgentConfig) -> Result<()> {
    let mut session = start_session(args, config).await?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    chat::run(&mut session, stdin, tokio::io::stdout()).await
}

async fn handle_serve(args: ServeArgs, mut config: FinAgentConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    let bind_addr = config.bind_addr.clone();
    finagent::server::serve(&bind_addr, Arc::new(GroqAgentFactory::new(config))).await
}
