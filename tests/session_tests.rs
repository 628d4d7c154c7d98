//! Session: credential lifecycle and history bookkeeping.

mod common;

use std::sync::Arc;

use common::MockFactory;
use finagent::agent::{AgentResponse, ResponseMessage};
use finagent::error::FinAgentError;
use finagent::session::Session;
use pretty_assertions::assert_eq;

fn session() -> (Arc<MockFactory>, Session) {
    let factory = Arc::new(MockFactory::new());
    let session = Session::new(factory.clone());
    (factory, session)
}

#[tokio::test]
async fn valid_credential_then_question_records_one_entry() {
    let (factory, mut session) = session();
    factory.agent.reply(AgentResponse::DirectText("AAPL is $190".into()));

    session.set_credential("sk_valid").await.unwrap();
    let entry = session.ask("AAPL price?").await.unwrap();
    assert_eq!(entry.question, "AAPL price?");
    assert_eq!(entry.response.normalize(), "AAPL is $190");

    assert_eq!(session.history().len(), 1);
    assert_eq!(factory.build_count(), 1);
}

#[tokio::test]
async fn blank_credential_is_rejected_without_agent() {
    let (factory, mut session) = session();
    let err = session.set_credential("   ").await.unwrap_err();
    assert!(err.is_validation());
    assert!(!session.has_credential());
    assert_eq!(factory.build_count(), 0);
}

#[tokio::test]
async fn blank_credential_after_questions_leaves_history_alone() {
    let (factory, mut session) = session();
    session.set_credential("sk_valid").await.unwrap();
    session.ask("AAPL price?").await.unwrap();

    let err = session.set_credential("").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(factory.build_count(), 1);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().last().unwrap().question, "AAPL price?");
}

#[tokio::test]
async fn prepared_question_is_recorded_separately() {
    let (factory, mut session) = session();
    session.set_credential("sk_valid").await.unwrap();

    let agent = session.prepare("MSFT?").unwrap();
    let response = agent.run("MSFT?").await.unwrap();
    assert!(session.history().is_empty());

    session.record("MSFT?", response);
    assert_eq!(session.history().len(), 1);
    assert_eq!(*factory.agent.queries.lock().unwrap(), vec!["MSFT?"]);
    assert!(session.prepare("  ").unwrap_err().is_validation());
}

#[tokio::test]
async fn rejected_credential_drops_previous_agent() {
    let (_factory, mut session) = session();
    session.set_credential("sk_valid").await.unwrap();
    assert!(session.has_credential());

    let err = session.set_credential("sk_invalid").await.unwrap_err();
    assert!(matches!(err, FinAgentError::Authentication(_)));
    assert!(!session.has_credential());
}

#[tokio::test]
async fn asking_without_credential_fails() {
    let (factory, mut session) = session();
    let err = session.ask("AAPL price?").await.unwrap_err();
    assert!(err.is_validation());
    assert!(session.history().is_empty());
    assert!(factory.agent.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn n_successful_asks_append_in_order() {
    let (_factory, mut session) = session();
    session.set_credential("sk_valid").await.unwrap();

    let questions = ["q one", "q two", "q three", "q four"];
    for q in questions {
        session.ask(q).await.unwrap();
    }

    let recorded: Vec<&str> = session.history().iter().map(|e| e.question.as_str()).collect();
    assert_eq!(recorded, questions);
    let latest: Vec<(usize, &str)> = session
        .history()
        .latest_first()
        .map(|(n, e)| (n, e.question.as_str()))
        .collect();
    assert_eq!(latest[0], (4, "q four"));
    assert_eq!(latest[3], (1, "q one"));
}

#[tokio::test]
async fn failed_or_blank_ask_leaves_history_unchanged() {
    let (factory, mut session) = session();
    session.set_credential("sk_valid").await.unwrap();
    session.ask("first").await.unwrap();

    factory.agent.fail(FinAgentError::api(500, "upstream exploded"));
    assert!(session.ask("second").await.is_err());
    assert!(session.ask("   ").await.unwrap_err().is_validation());

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().last().unwrap().question, "first");
    assert_eq!(*factory.agent.queries.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn the_agent_is_built_once_and_reused() {
    let (factory, mut session) = session();
    session.set_credential("sk_valid").await.unwrap();
    for _ in 0..3 {
        session.ask("Show me Ford (F) stock information").await.unwrap();
    }
    assert_eq!(factory.build_count(), 1);
}

#[tokio::test]
async fn clear_empties_history_but_keeps_credential() {
    let (_factory, mut session) = session();
    session.set_credential("sk_valid").await.unwrap();
    session.ask("a").await.unwrap();
    session.ask("b").await.unwrap();

    session.clear_history();
    assert_eq!(session.history().len(), 0);
    assert!(session.has_credential());

    session.ask("c").await.unwrap();
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn message_list_responses_are_stored_as_returned() {
    let (factory, mut session) = session();
    factory.agent.reply(AgentResponse::MessageList(vec![
        ResponseMessage::new("TSLA: "),
        ResponseMessage::new("$251"),
    ]));
    session.set_credential("sk_valid").await.unwrap();

    let entry = session.ask("TSLA?").await.unwrap();
    assert!(matches!(entry.response, AgentResponse::MessageList(_)));
    assert_eq!(entry.response.normalize(), "TSLA: $251");
}
