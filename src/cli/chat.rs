//! Line-oriented REPL over a [`Session`].

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::questions::{MARKET_QUESTIONS, STOCK_QUESTIONS};
use crate::session::Session;

const HELP: &str =
    "Commands: /questions, /history, /clear, /quit. Anything else is sent to the agent.";

/// Drive the REPL until EOF or `/quit`. The session must already hold a
/// credential. Agent failures are printed and the loop continues.
pub async fn run<R, W>(session: &mut Session, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(format!("{HELP}\n> ").as_bytes()).await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let reply = match line {
            "" => String::new(),
            "/quit" | "/exit" => break,
            "/help" => format!("{HELP}\n"),
            "/questions" => render_questions(),
            "/clear" => {
                session.clear_history();
                "History cleared.\n".to_string()
            }
            "/history" => render_history(session),
            question => match session.ask(question).await {
                Ok(entry) => format!("{}\n", entry.response.normalize()),
                Err(e) if e.is_validation() => format!("{e}\n"),
                Err(e) => format!("Error: {e}. Please check your API key and try again.\n"),
            },
        };
        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"> ").await?;
        output.flush().await?;
    }

    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

/// The sample question catalog, numbered.
pub fn render_questions() -> String {
    let mut out = String::from("Stock questions:\n");
    for (i, q) in STOCK_QUESTIONS.iter().enumerate() {
        out.push_str(&format!("  {}. {q}\n", i + 1));
    }
    out.push_str("Market questions:\n");
    for (i, q) in MARKET_QUESTIONS.iter().enumerate() {
        out.push_str(&format!("  {}. {q}\n", i + 1));
    }
    out
}

fn render_history(session: &Session) -> String {
    let history = session.history();
    if history.is_empty() {
        return "No questions yet.\n".to_string();
    }
    history
        .latest_first()
        .map(|(n, entry)| {
            format!(
                "Q{n}: {}\n[{}] {}\n",
                entry.question,
                entry.time_label(),
                entry.response.normalize()
            )
        })
        .collect()
}
