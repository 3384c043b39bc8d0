//! Inference layer: ONNX Runtime scoring for the six-label toxicity model.

mod scorer;
pub use scorer::CommentScorer;

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::OnnxScorer;
