//! The fixed label set of the toxicity model.
//!
//! The model emits one probability per label in this exact order. Positions
//! are significant: output column `i` corresponds to `LABELS[i]`, and flagged
//! labels are always reported in this order, never sorted by probability.

/// Number of output labels.
pub const LABEL_COUNT: usize = 6;

/// Output labels of the toxicity model, in model output order.
pub const LABELS: [&str; LABEL_COUNT] = [
    "toxic",
    "severe_toxic",
    "obscene",
    "threat",
    "insult",
    "identity_hate",
];
