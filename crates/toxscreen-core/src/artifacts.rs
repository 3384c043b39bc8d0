//! On-disk artifact names shared by the provisioner and the model loader.

/// ONNX model graph.
pub const MODEL_FILE: &str = "model.onnx";

/// Tokenizer definition, in HuggingFace `tokenizer.json` format.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Default directory the artifacts live in, relative to the working directory.
pub const DEFAULT_MODELS_DIR: &str = "models";
