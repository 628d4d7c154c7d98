//! The CLI question loop over in-memory streams.
#![cfg(feature = "cli")]

mod common;

use std::sync::Arc;

use common::MockFactory;
use finagent::agent::AgentResponse;
use finagent::cli::chat;
use finagent::session::Session;
use tokio::io::BufReader;

async fn run_script(factory: Arc<MockFactory>, script: &str) -> (Session, String) {
    let mut session = Session::new(factory);
    session.set_credential("sk_valid").await.unwrap();
    let mut out = Vec::new();
    chat::run(&mut session, BufReader::new(script.as_bytes()), &mut out)
        .await
        .unwrap();
    (session, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn questions_are_answered_and_recorded() {
    let factory = Arc::new(MockFactory::new());
    factory.agent.reply(AgentResponse::DirectText("AAPL is $190".into()));

    let (session, out) = run_script(factory, "AAPL price?\n/history\n/quit\nignored\n").await;

    assert!(out.contains("AAPL is $190"));
    assert!(out.contains("Q1: AAPL price?"));
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn clear_and_questions_commands() {
    let factory = Arc::new(MockFactory::new());
    let (session, out) = run_script(factory, "one\ntwo\n/clear\n/questions\n").await;

    assert!(out.contains("History cleared."));
    assert!(out.contains("1. What is the current stock price of Apple (AAPL)?"));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn agent_errors_do_not_end_the_loop() {
    let factory = Arc::new(MockFactory::new());
    factory
        .agent
        .fail(finagent::error::FinAgentError::api(503, "unavailable"));

    let (session, out) = run_script(factory, "first\nsecond\n").await;

    assert!(out.contains("Please check your API key and try again."));
    assert!(out.contains("answer to: second"));
    assert_eq!(session.history().len(), 1);
}
