//! JSON envelope returned by the classify endpoint.

use serde::{Deserialize, Serialize};

use crate::verdict::Verdict;

/// Response body for `POST /classify/`.
///
/// A classified comment carries both fields. Invalid input carries the
/// sentinel `result` with the `score` key omitted entirely, not set to null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl ClassifyResponse {
    /// Sentinel envelope for a missing or empty comment.
    pub fn invalid_input() -> Self {
        Self {
            result: "Invalid input".to_string(),
            score: None,
        }
    }
}

impl From<Verdict> for ClassifyResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            result: verdict.result_string(),
            score: Some(verdict.score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_envelope_carries_result_and_score() {
        let verdict = Verdict::from_probabilities(&[0.1, 0.0, 0.0, 0.0, 0.9, 0.0], 0.5);
        let json = serde_json::to_value(ClassifyResponse::from(verdict)).unwrap();

        assert_eq!(json["result"], "Toxic (insult)");
        assert!((json["score"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn invalid_input_omits_score_key() {
        let json = serde_json::to_value(ClassifyResponse::invalid_input()).unwrap();

        assert_eq!(json["result"], "Invalid input");
        // Key must be absent, not null.
        assert!(!json.as_object().unwrap().contains_key("score"));
    }

    #[test]
    fn deserializes_with_and_without_score() {
        let with: ClassifyResponse =
            serde_json::from_str(r#"{"result":"Non-Toxic","score":0.12}"#).unwrap();
        assert_eq!(with.result, "Non-Toxic");
        assert!(with.score.is_some());

        let without: ClassifyResponse =
            serde_json::from_str(r#"{"result":"Invalid input"}"#).unwrap();
        assert_eq!(without.result, "Invalid input");
        assert!(without.score.is_none());
    }
}
