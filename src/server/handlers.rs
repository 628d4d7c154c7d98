//! Form handlers. Every POST ends in a redirect back to `/`.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::{FinAgentError, Result};
use crate::questions::{is_catalog_question, QuickLookup};

use super::{page, AppState, Flash};

#[derive(Deserialize)]
pub(super) struct CredentialForm {
    #[serde(default)]
    api_key: String,
}

/// Fields of the question forms. Each form on the page submits one group.
#[derive(Debug, Default, Deserialize)]
pub struct AskForm {
    pub preset: Option<String>,
    pub custom: Option<String>,
    pub symbol: Option<String>,
    pub lookup: Option<String>,
}

/// Pick the question a form submission asks: quick lookup, then custom
/// text, then a preset.
pub fn resolve_question(form: &AskForm) -> Result<String> {
    if let Some(lookup) = form.lookup.as_deref() {
        let kind: QuickLookup = lookup
            .parse()
            .map_err(|_| FinAgentError::Validation(format!("unknown lookup: {lookup}")))?;
        return kind
            .question(form.symbol.as_deref().unwrap_or_default())
            .ok_or_else(|| FinAgentError::Validation("enter a stock symbol".into()));
    }

    let pick = |field: &Option<String>| {
        field
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(str::to_string)
    };
    pick(&form.custom)
        .or_else(|| pick(&form.preset))
        .ok_or_else(|| FinAgentError::Validation("question must not be empty".into()))
}

fn error_flash(err: &FinAgentError) -> Flash {
    if err.is_validation() {
        Flash::Error(err.to_string())
    } else {
        Flash::Error(format!("Error: {err}. Please check your API key and try again."))
    }
}

pub(super) async fn index(State(state): State<AppState>) -> Html<String> {
    let mut form = state.lock().await;
    let html = page::render(&form);
    form.flash = None;
    Html(html)
}

pub(super) async fn set_credential(
    State(state): State<AppState>,
    Form(req): Form<CredentialForm>,
) -> Redirect {
    let mut form = state.lock().await;
    form.flash = Some(match form.session.set_credential(&req.api_key).await {
        Ok(()) => Flash::Success("API key validated successfully!".into()),
        Err(e) => Flash::Error(format!("Invalid API key: {e}")),
    });
    Redirect::to("/")
}

/// The session is locked only to fetch the agent and to record the answer,
/// so the page stays readable while the agent runs.
pub(super) async fn ask(State(state): State<AppState>, Form(req): Form<AskForm>) -> Redirect {
    let prepared = match resolve_question(&req) {
        Ok(question) => {
            debug!(catalog = is_catalog_question(&question), "form question");
            let agent = state.lock().await.session.prepare(&question);
            agent.map(|agent| (question, agent))
        }
        Err(e) => Err(e),
    };

    let outcome = match prepared {
        Ok((question, agent)) => match agent.run(&question).await {
            Ok(response) => Ok((question, response)),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    let mut form = state.lock().await;
    form.flash = match outcome {
        Ok((question, response)) => {
            form.session.record(&question, response);
            None
        }
        Err(e) => Some(error_flash(&e)),
    };
    Redirect::to("/")
}

pub(super) async fn clear_history(State(state): State<AppState>) -> Redirect {
    let mut form = state.lock().await;
    form.session.clear_history();
    form.flash = Some(Flash::Success("History cleared.".into()));
    Redirect::to("/")
}
