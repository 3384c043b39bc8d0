//! ONNX Runtime scoring pipeline for the toxicity model.
//!
//! Loads a six-label toxic-comment classifier exported to ONNX, together with
//! its tokenizer. The models directory must contain `model.onnx` and
//! `tokenizer.json`. The network emits one raw logit per label; the scorer
//! applies the sigmoid to turn them into probabilities.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;

use toxscreen_core::artifacts::{MODEL_FILE, TOKENIZER_FILE};
use toxscreen_core::{LABEL_COUNT, Verdict};

use crate::scorer::CommentScorer;

/// Comment length cap in tokens, matching the max position embeddings of the
/// BERT-family checkpoints this serves.
const MAX_TOKENS: usize = 512;

/// Toxicity scorer backed by ONNX Runtime.
///
/// Session and tokenizer are loaded once and shared for the process lifetime.
/// `Session::run` takes `&mut self`, so the session sits behind a mutex and
/// each forward pass runs on a blocking thread; concurrent requests serialise
/// on the lock.
#[derive(Debug)]
pub struct OnnxScorer {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    threshold: f32,
    /// BERT-family checkpoints declare a `token_type_ids` input; RoBERTa-family
    /// ones do not. Detected once at load.
    feed_type_ids: bool,
}

impl OnnxScorer {
    /// Load the model and tokenizer from a directory containing `model.onnx`
    /// and `tokenizer.json`.
    pub fn load(models_dir: &Path, threshold: f32, onnx_threads: usize) -> anyhow::Result<Self> {
        let model_path = models_dir.join(MODEL_FILE);
        let tokenizer_path = models_dir.join(TOKENIZER_FILE);

        anyhow::ensure!(
            model_path.exists(),
            "{MODEL_FILE} not found in {models_dir:?}; run `toxscreen fetch` to download it"
        );
        anyhow::ensure!(
            tokenizer_path.exists(),
            "{TOKENIZER_FILE} not found in {models_dir:?}; run `toxscreen fetch` to download it"
        );

        ort::init().commit();

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(onnx_threads)?
            .commit_from_file(&model_path)
            .with_context(|| format!("load ONNX model from {}", model_path.display()))?;

        // Fail at startup if the checkpoint lacks the six-label head.
        if let Some(labels) = output_label_count(session.outputs()[0].dtype())
            && labels != LABEL_COUNT
        {
            anyhow::bail!("model has {labels} output labels, expected {LABEL_COUNT}");
        }

        let feed_type_ids = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;

        // Truncate long comments to the model's context window.
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;

        info!(threshold, model = %model_path.display(), "loaded toxicity model");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            threshold,
            feed_type_ids,
        })
    }
}

#[async_trait::async_trait]
impl CommentScorer for OnnxScorer {
    async fn score(&self, comment: &str) -> anyhow::Result<Verdict> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let threshold = self.threshold;
        let feed_type_ids = self.feed_type_ids;
        let comment = comment.to_string();

        // Tokenization and the forward pass are CPU-bound; keep them off the
        // async runtime.
        let probs = tokio::task::spawn_blocking(move || {
            run_model(&session, &tokenizer, &comment, feed_type_ids)
        })
        .await
        .context("inference task panicked")??;

        Ok(Verdict::from_probabilities(&probs, threshold))
    }
}

/// Tokenize one comment, run the forward pass, and sigmoid the six logits.
fn run_model(
    session: &Mutex<Session>,
    tokenizer: &Tokenizer,
    comment: &str,
    feed_type_ids: bool,
) -> anyhow::Result<[f32; LABEL_COUNT]> {
    let encoding = tokenizer
        .encode(comment, true)
        .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;

    let seq_len = encoding.get_ids().len();
    anyhow::ensure!(seq_len > 0, "tokenizer produced no tokens");

    // Input tensors: [1, seq_len].
    let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let attention_mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();

    let shape = [1i64, seq_len as i64];
    let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))?;
    let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))?;

    let mut session = session
        .lock()
        .map_err(|e| anyhow::anyhow!("session lock poisoned: {e}"))?;

    let outputs = if feed_type_ids {
        let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();
        let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))?;
        session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
            "token_type_ids" => type_tensor,
        ])?
    } else {
        session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
        ])?
    };

    // Extract logits: [1, LABEL_COUNT].
    let (output_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
    let dims: &[i64] = output_shape;
    anyhow::ensure!(
        dims.len() == 2 && dims[0] == 1 && dims[1] as usize == LABEL_COUNT,
        "unexpected output shape: {dims:?}, expected [1, {LABEL_COUNT}]"
    );

    let mut probs = [0.0f32; LABEL_COUNT];
    for (p, &logit) in probs.iter_mut().zip(logits) {
        *p = sigmoid(logit);
    }
    Ok(probs)
}

/// Sigmoid activation: maps a raw logit to (0, 1).
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Try to read the label count from the ONNX model's output type.
fn output_label_count(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => {
            // Last dimension is the per-label logit axis.
            shape
                .last()
                .and_then(|&d| if d > 0 { Some(d as usize) } else { None })
        }
        _ => None,
    }
}
