//! Web form front-end (axum).
//!
//! ```text
//! GET  /                 form page
//! POST /credential       api_key
//! POST /ask              preset | custom | symbol + lookup
//! POST /history/clear
//! GET  /health
//! ```
//!
//! A single in-memory session backs the page; requests that touch it are
//! serialized by its mutex.

mod handlers;
mod page;

pub use handlers::{resolve_question, AskForm};

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::AgentFactory;
use crate::error::{FinAgentError, Result};
use crate::session::Session;

/// One-shot status line shown above the form after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

/// Everything the page renders from.
#[derive(Debug)]
pub struct FormState {
    pub session: Session,
    pub flash: Option<Flash>,
}

/// Router state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<FormState>>,
}

impl AppState {
    pub fn new(factory: Arc<dyn AgentFactory>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FormState {
                session: Session::new(factory),
                flash: None,
            })),
        }
    }

    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, FormState> {
        self.inner.lock().await
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/credential", post(handlers::set_credential))
        .route("/ask", post(handlers::ask))
        .route("/history/clear", post(handlers::clear_history))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(bind_addr: &str, factory: Arc<dyn AgentFactory>) -> Result<()> {
    let app = router(AppState::new(factory));

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| FinAgentError::Configuration(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "finance agent form listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("finance agent form shut down");
    Ok(())
}
