//! HTTP layer: the two-route classification service.
//!
//! `GET /` serves the embedded home page; `POST /classify/` scores one
//! form-encoded comment and answers with the verdict envelope.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use toxscreen_ai::CommentScorer;

mod classify;
mod home;

/// Shared state handed to every request handler.
///
/// Built once at startup and cloned per request; the scorer is never mutated
/// after load.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<dyn CommentScorer>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/classify/", post(classify::classify))
        .with_state(state)
}
