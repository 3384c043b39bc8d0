//! Scoring seam between the HTTP layer and the inference backend.

use toxscreen_core::Verdict;

/// Scores one normalised comment against the toxicity label set.
///
/// The server holds a single scorer behind `Arc<dyn CommentScorer>` for the
/// lifetime of the process; implementations must be safe to call from
/// concurrent request handlers.
#[async_trait::async_trait]
pub trait CommentScorer: Send + Sync {
    async fn score(&self, comment: &str) -> anyhow::Result<Verdict>;
}
