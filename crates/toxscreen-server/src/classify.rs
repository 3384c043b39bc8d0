//! The classify endpoint: form-encoded comment in, JSON verdict out.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::{debug, error};

use toxscreen_core::{ClassifyResponse, normalize_comment};

use crate::AppState;

/// Form body for `POST /classify/`.
#[derive(Deserialize)]
pub(crate) struct ClassifyParams {
    /// A missing field and an empty value are both invalid input.
    #[serde(default)]
    pub(crate) comment: Option<String>,
}

/// Score one comment and answer with the verdict envelope.
///
/// Missing, empty, or whitespace-only comments get the sentinel envelope
/// with HTTP 200. Inference failures map to 500; the service never reports
/// a made-up verdict.
pub(crate) async fn classify(
    State(state): State<AppState>,
    Form(params): Form<ClassifyParams>,
) -> Result<Json<ClassifyResponse>, StatusCode> {
    let Some(comment) = params.comment.as_deref().and_then(normalize_comment) else {
        return Ok(Json(ClassifyResponse::invalid_input()));
    };

    let verdict = state.scorer.score(&comment).await.map_err(|e| {
        error!(error = %e, "inference failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    debug!(score = verdict.score, toxic = verdict.is_toxic(), "classified comment");
    Ok(Json(ClassifyResponse::from(verdict)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::testing::FakeScorer;
    use toxscreen_core::LABEL_COUNT;

    fn state_with(scorer: Arc<FakeScorer>) -> State<AppState> {
        State(AppState { scorer })
    }

    #[tokio::test]
    async fn valid_comment_returns_verdict_envelope() {
        let scorer = Arc::new(FakeScorer::returning([0.1, 0.0, 0.0, 0.0, 0.9, 0.0]));
        let params = ClassifyParams {
            comment: Some("You utter fool".into()),
        };

        let Json(resp) = classify(state_with(scorer), Form(params)).await.unwrap();
        assert_eq!(resp.result, "Toxic (insult)");
        assert!((resp.score.unwrap() - 0.9).abs() < 1e-6);
    }

    #[tokio::test]
    async fn missing_comment_is_invalid_input() {
        let scorer = Arc::new(FakeScorer::returning([0.9; LABEL_COUNT]));
        let params = ClassifyParams { comment: None };

        let Json(resp) = classify(state_with(Arc::clone(&scorer)), Form(params))
            .await
            .unwrap();
        assert_eq!(resp.result, "Invalid input");
        assert!(resp.score.is_none());
        // Invalid input never reaches the model.
        assert!(scorer.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_comment_is_invalid_input() {
        let scorer = Arc::new(FakeScorer::returning([0.9; LABEL_COUNT]));
        let params = ClassifyParams {
            comment: Some("   \t ".into()),
        };

        let Json(resp) = classify(state_with(Arc::clone(&scorer)), Form(params))
            .await
            .unwrap();
        assert_eq!(resp.result, "Invalid input");
        assert!(scorer.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_is_normalized_before_scoring() {
        let scorer = Arc::new(FakeScorer::returning([0.0; LABEL_COUNT]));
        let params = ClassifyParams {
            comment: Some("  MiXed CASE  ".into()),
        };

        classify(state_with(Arc::clone(&scorer)), Form(params))
            .await
            .unwrap();
        assert_eq!(*scorer.seen.lock().unwrap(), vec!["mixed case"]);
    }

    #[tokio::test]
    async fn scorer_error_becomes_500() {
        let scorer = Arc::new(FakeScorer::failing());
        let params = ClassifyParams {
            comment: Some("anything".into()),
        };

        let err = classify(state_with(scorer), Form(params)).await.unwrap_err();
        assert_eq!(err, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
