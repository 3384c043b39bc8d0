//! Provisioning layer: downloads model artifacts into the models directory.

mod provision;

pub use provision::{Artifact, DEFAULT_MODEL_URL, DEFAULT_TOKENIZER_URL, FetchError, Provisioner};
