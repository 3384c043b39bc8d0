//! Startup provisioning of the model and tokenizer files.
//!
//! Presence on disk is the only freshness check: an existing file is never
//! re-downloaded or re-validated. Downloads stream to a `.part` file and are
//! renamed into place once complete, so a file under its final name is always
//! a whole artifact. Delete the models directory to force a fresh fetch.

use std::path::PathBuf;

use futures::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::info;

use toxscreen_core::artifacts::{MODEL_FILE, TOKENIZER_FILE};

/// Where the six-label toxicity checkpoint lives.
pub const DEFAULT_MODEL_URL: &str =
    "https://huggingface.co/unitary/toxic-bert/resolve/main/model.onnx";

/// Tokenizer matching the default model.
pub const DEFAULT_TOKENIZER_URL: &str =
    "https://huggingface.co/unitary/toxic-bert/resolve/main/tokenizer.json";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("write artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// One remote artifact and the file name it lands under.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub url: String,
}

impl Artifact {
    /// The ONNX model graph.
    pub fn model(url: String) -> Self {
        Self {
            file_name: MODEL_FILE.to_string(),
            url,
        }
    }

    /// The tokenizer definition.
    pub fn tokenizer(url: String) -> Self {
        Self {
            file_name: TOKENIZER_FILE.to_string(),
            url,
        }
    }
}

/// Downloads model artifacts into the models directory.
///
/// Runs once at startup, before the model loads. A failed download is fatal
/// to the caller; the service never starts without its artifacts.
pub struct Provisioner {
    client: reqwest::Client,
    models_dir: PathBuf,
}

impl Provisioner {
    pub fn new(models_dir: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            models_dir,
        }
    }

    /// Ensure one artifact exists locally, downloading it when absent.
    ///
    /// Returns `true` when a download happened, `false` when the file was
    /// already present.
    pub async fn ensure(&self, artifact: &Artifact) -> Result<bool, FetchError> {
        let dest = self.models_dir.join(&artifact.file_name);
        if dest.exists() {
            info!(file = %dest.display(), "artifact present, skipping download");
            return Ok(false);
        }

        tokio::fs::create_dir_all(&self.models_dir).await?;

        info!(url = %artifact.url, file = %dest.display(), "downloading artifact");
        let resp = self.client.get(&artifact.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        // Checkpoints run to hundreds of megabytes; stream to disk instead of
        // buffering the body. The rename is what publishes the file.
        let part = self.models_dir.join(format!("{}.part", artifact.file_name));
        let mut file = tokio::fs::File::create(&part).await?;
        let mut stream = resp.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        drop(file);
        tokio::fs::rename(&part, &dest).await?;

        info!(file = %dest.display(), bytes = written, "artifact downloaded");
        Ok(true)
    }

    /// Ensure every artifact exists locally, stopping at the first failure.
    pub async fn ensure_all(&self, artifacts: &[Artifact]) -> Result<(), FetchError> {
        for artifact in artifacts {
            self.ensure(artifact).await?;
        }
        Ok(())
    }
}
