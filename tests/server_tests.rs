//! Web form routes driven through the router without a socket.
#![cfg(feature = "server")]

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::MockFactory;
use finagent::agent::{AgentFactory, AgentHandle, AgentResponse};
use finagent::error::{FinAgentError, Result};
use finagent::server::{router, AppState};
use http_body_util::BodyExt;
use tokio::sync::Notify;
use tower::ServiceExt;

/// Hands out agents that wait for the gate before answering.
struct GatedFactory {
    gate: Arc<Notify>,
}

struct GatedAgent {
    gate: Arc<Notify>,
}

#[async_trait]
impl AgentFactory for GatedFactory {
    async fn build(&self, _credential: &str) -> Result<Arc<dyn AgentHandle>> {
        Ok(Arc::new(GatedAgent {
            gate: self.gate.clone(),
        }))
    }
}

#[async_trait]
impl AgentHandle for GatedAgent {
    fn model_id(&self) -> &str {
        "gated"
    }

    fn tool_names(&self) -> Vec<String> {
        vec![]
    }

    async fn run(&self, _query: &str) -> Result<AgentResponse> {
        self.gate.notified().await;
        Ok(AgentResponse::DirectText("slow answer".into()))
    }
}

fn app() -> (Arc<MockFactory>, AppState, Router) {
    let factory = Arc::new(MockFactory::new());
    let state = AppState::new(factory.clone());
    let app = router(state.clone());
    (factory, state, app)
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    if status == StatusCode::SEE_OTHER {
        assert_eq!(resp.headers()[header::LOCATION], "/");
    }
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn page(app: &Router) -> String {
    let (status, body) = send(app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn health_is_ok() {
    let (_f, _s, app) = app();
    let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn page_without_credential_prompts_for_key() {
    let (_f, _s, app) = app();
    let body = page(&app).await;
    assert!(body.contains("Please enter your Groq API key to get started."));
    assert!(!body.contains("action=\"/ask\""));
}

#[tokio::test]
async fn valid_key_unlocks_questions_and_flashes_once() {
    let (_f, state, app) = app();
    let (status, _) = send(&app, post_form("/credential", "api_key=sk_valid")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(state.lock().await.session.has_credential());

    let body = page(&app).await;
    assert!(body.contains("API key validated successfully!"));
    assert!(body.contains("Analyze the S&amp;P 500 index performance today"));
    assert!(body.contains("name=\"lookup\" value=\"price\""));

    let again = page(&app).await;
    assert!(!again.contains("API key validated successfully!"));
}

#[tokio::test]
async fn invalid_key_flashes_error() {
    let (_f, state, app) = app();
    send(&app, post_form("/credential", "api_key=sk_invalid")).await;
    assert!(!state.lock().await.session.has_credential());
    assert!(page(&app).await.contains("Invalid API key:"));
}

#[tokio::test]
async fn blank_key_flashes_validation_error_and_keeps_history() {
    let (factory, state, app) = app();
    send(&app, post_form("/credential", "api_key=sk_valid")).await;
    send(&app, post_form("/ask", "custom=one")).await;

    let (status, _) = send(&app, post_form("/credential", "api_key=")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(factory.build_count(), 1);
    {
        let form = state.lock().await;
        assert!(!form.session.has_credential());
        assert_eq!(form.session.history().len(), 1);
    }

    let body = page(&app).await;
    assert!(body.contains("Invalid API key: Validation error: API key is required"));
    assert!(body.contains("Please enter your Groq API key to get started."));
}

#[tokio::test]
async fn page_stays_viewable_while_agent_runs() {
    let gate = Arc::new(Notify::new());
    let factory = Arc::new(GatedFactory { gate: gate.clone() });
    let state = AppState::new(factory);
    let app = router(state.clone());
    send(&app, post_form("/credential", "api_key=sk_valid")).await;

    let asking = tokio::spawn({
        let app = app.clone();
        async move { send(&app, post_form("/ask", "custom=slow+question")).await }
    });

    let (status, body) = tokio::time::timeout(
        Duration::from_secs(5),
        send(&app, Request::get("/").body(Body::empty()).unwrap()),
    )
    .await
    .expect("page blocked by running agent");
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Conversation History"));

    gate.notify_one();
    asking.await.unwrap();

    let form = state.lock().await;
    assert_eq!(form.session.history().len(), 1);
    assert_eq!(form.session.history().last().unwrap().response.normalize(), "slow answer");
}

#[tokio::test]
async fn history_shows_arrival_time() {
    let (_f, state, app) = app();
    send(&app, post_form("/credential", "api_key=sk_valid")).await;
    send(&app, post_form("/ask", "custom=when")).await;

    let label = state.lock().await.session.history().last().unwrap().time_label();
    assert!(page(&app).await.contains(&format!("Asked at {label}")));
}

#[tokio::test]
async fn ask_records_history_and_renders_latest_first() {
    let (factory, state, app) = app();
    factory.agent.reply(AgentResponse::DirectText("first <b>answer</b>".into()));
    factory.agent.reply(AgentResponse::DirectText("second answer".into()));

    send(&app, post_form("/credential", "api_key=sk_valid")).await;
    send(&app, post_form("/ask", "custom=What+about+%3Cscript%3E%3F")).await;
    send(&app, post_form("/ask", "symbol=tsla&lookup=analysis")).await;

    assert_eq!(state.lock().await.session.history().len(), 2);
    assert_eq!(
        factory.agent.queries.lock().unwrap()[1],
        "Provide a comprehensive analysis of TSLA including price, performance, and recent news"
    );

    let body = page(&app).await;
    assert!(body.contains("first &lt;b&gt;answer&lt;/b&gt;"));
    assert!(!body.contains("<script>"));
    let q2 = body.find("Q2: Provide a comprehensive analysis of TSLA").unwrap();
    let q1 = body.find("Q1: What about &lt;script&gt;?").unwrap();
    assert!(q2 < q1);
}

#[tokio::test]
async fn history_labels_are_truncated() {
    let (_f, _s, app) = app();
    send(&app, post_form("/credential", "api_key=sk_valid")).await;
    let long = "x".repeat(80);
    send(&app, post_form("/ask", &format!("custom={long}"))).await;

    let body = page(&app).await;
    assert!(body.contains(&format!("Q1: {}...</summary>", "x".repeat(60))));
}

#[tokio::test]
async fn agent_failure_flashes_hint_and_keeps_history() {
    let (factory, state, app) = app();
    send(&app, post_form("/credential", "api_key=sk_valid")).await;
    factory.agent.fail(FinAgentError::api(500, "boom"));
    send(&app, post_form("/ask", "preset=Tell+me+about+recent+market+volatility")).await;

    assert!(state.lock().await.session.history().is_empty());
    let body = page(&app).await;
    assert!(body.contains("Please check your API key and try again."));
}

#[tokio::test]
async fn blank_question_is_not_forwarded() {
    let (factory, _s, app) = app();
    send(&app, post_form("/credential", "api_key=sk_valid")).await;
    send(&app, post_form("/ask", "custom=+++")).await;

    assert!(factory.agent.queries.lock().unwrap().is_empty());
    assert!(page(&app).await.contains("question must not be empty"));
}

#[tokio::test]
async fn clear_history_empties_the_list() {
    let (_f, state, app) = app();
    send(&app, post_form("/credential", "api_key=sk_valid")).await;
    send(&app, post_form("/ask", "custom=one")).await;
    send(&app, post_form("/history/clear", "")).await;

    assert!(state.lock().await.session.history().is_empty());
    let body = page(&app).await;
    assert!(body.contains("History cleared."));
    assert!(!body.contains("Conversation History"));
}
