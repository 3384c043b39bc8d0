//! Verdict derivation from model probabilities.
//!
//! A comment is toxic when any per-label probability strictly exceeds the
//! threshold. The overall score is the maximum probability across all labels,
//! reported even when nothing crosses the threshold.

use crate::labels::{LABEL_COUNT, LABELS};

/// Default classification threshold applied to per-label probabilities.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Outcome of classifying one comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Maximum probability across all six labels.
    pub score: f32,
    /// Labels whose probability strictly exceeds the threshold, in model
    /// output order.
    pub flagged: Vec<&'static str>,
}

impl Verdict {
    /// Derive a verdict from the model's per-label probabilities.
    ///
    /// Membership is strictly greater-than: a probability exactly at the
    /// threshold does not flag its label.
    pub fn from_probabilities(probs: &[f32; LABEL_COUNT], threshold: f32) -> Self {
        let score = probs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let flagged = LABELS
            .iter()
            .zip(probs)
            .filter(|&(_, &p)| p > threshold)
            .map(|(&label, _)| label)
            .collect();
        Self { score, flagged }
    }

    /// Whether any label crossed the threshold.
    pub fn is_toxic(&self) -> bool {
        !self.flagged.is_empty()
    }

    /// Human-readable verdict: `Toxic (toxic, insult)` or `Non-Toxic`.
    pub fn result_string(&self) -> String {
        if self.flagged.is_empty() {
            "Non-Toxic".to_string()
        } else {
            format!("Toxic ({})", self.flagged.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_toxic_when_nothing_crosses_threshold() {
        let v = Verdict::from_probabilities(&[0.1, 0.2, 0.3, 0.4, 0.2, 0.1], DEFAULT_THRESHOLD);
        assert!(!v.is_toxic());
        assert_eq!(v.result_string(), "Non-Toxic");
        // Score still reports the strongest label.
        assert!((v.score - 0.4).abs() < 1e-6);
    }

    #[test]
    fn single_label_flagged() {
        let v = Verdict::from_probabilities(&[0.1, 0.0, 0.0, 0.0, 0.9, 0.0], DEFAULT_THRESHOLD);
        assert_eq!(v.flagged, vec!["insult"]);
        assert_eq!(v.result_string(), "Toxic (insult)");
        assert!((v.score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn flagged_follow_model_output_order() {
        // "insult" has the highest probability but must not be listed first.
        let v = Verdict::from_probabilities(&[0.9, 0.0, 0.6, 0.0, 0.99, 0.0], DEFAULT_THRESHOLD);
        assert_eq!(v.flagged, vec!["toxic", "obscene", "insult"]);
        assert_eq!(v.result_string(), "Toxic (toxic, obscene, insult)");
        assert!((v.score - 0.99).abs() < 1e-6);
    }

    #[test]
    fn exactly_at_threshold_not_flagged() {
        let v = Verdict::from_probabilities(&[0.5; LABEL_COUNT], DEFAULT_THRESHOLD);
        assert!(!v.is_toxic());
        assert_eq!(v.result_string(), "Non-Toxic");
        assert!((v.score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn all_labels_flagged() {
        let v = Verdict::from_probabilities(&[0.95; LABEL_COUNT], DEFAULT_THRESHOLD);
        assert_eq!(
            v.result_string(),
            "Toxic (toxic, severe_toxic, obscene, threat, insult, identity_hate)"
        );
    }

    #[test]
    fn lower_threshold_flags_more() {
        let probs = [0.4, 0.0, 0.35, 0.0, 0.0, 0.0];
        let at_default = Verdict::from_probabilities(&probs, DEFAULT_THRESHOLD);
        assert!(!at_default.is_toxic());

        let at_0_3 = Verdict::from_probabilities(&probs, 0.3);
        assert_eq!(at_0_3.flagged, vec!["toxic", "obscene"]);
    }
}
