//! `toxscreen` binary: provision artifacts, load the model, serve the API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use toxscreen_ai::OnnxScorer;
use toxscreen_core::DEFAULT_THRESHOLD;
use toxscreen_core::artifacts::DEFAULT_MODELS_DIR;
use toxscreen_fetch::{Artifact, DEFAULT_MODEL_URL, DEFAULT_TOKENIZER_URL, FetchError, Provisioner};
use toxscreen_server::{AppState, router};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download missing artifacts, load the model, and serve the API
    Serve(ServeArgs),
    /// Download missing artifacts and exit
    Fetch(FetchArgs),
}

#[derive(Args)]
struct ArtifactArgs {
    /// Directory the model artifacts live in
    #[arg(long, default_value = DEFAULT_MODELS_DIR, env = "TOXSCREEN_MODELS_DIR")]
    models_dir: PathBuf,
    /// Where to download the ONNX model from
    #[arg(long, default_value = DEFAULT_MODEL_URL, env = "TOXSCREEN_MODEL_URL")]
    model_url: String,
    /// Where to download the tokenizer from
    #[arg(long, default_value = DEFAULT_TOKENIZER_URL, env = "TOXSCREEN_TOKENIZER_URL")]
    tokenizer_url: String,
}

#[derive(Args)]
struct ServeArgs {
    #[command(flatten)]
    artifacts: ArtifactArgs,
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "127.0.0.1:8000", env = "TOXSCREEN_BIND")]
    bind: SocketAddr,
    /// Per-label probability threshold for flagging
    #[arg(
        long,
        default_value_t = DEFAULT_THRESHOLD,
        env = "TOXSCREEN_THRESHOLD",
        value_parser = parse_threshold
    )]
    threshold: f32,
    /// Intra-op thread count for ONNX Runtime
    #[arg(long, default_value_t = 1, env = "TOXSCREEN_ONNX_THREADS")]
    onnx_threads: usize,
}

#[derive(Args)]
struct FetchArgs {
    #[command(flatten)]
    artifacts: ArtifactArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into()))
        .init();

    match Cli::parse().command {
        Commands::Serve(args) => serve(args).await,
        Commands::Fetch(args) => {
            provision(&args.artifacts)
                .await
                .context("provisioning model artifacts")?;
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    provision(&args.artifacts)
        .await
        .context("provisioning model artifacts")?;

    let scorer = OnnxScorer::load(&args.artifacts.models_dir, args.threshold, args.onnx_threads)?;
    let state = AppState {
        scorer: Arc::new(scorer),
    };

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!(addr = %args.bind, "toxscreen listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Ensure both artifacts exist before anything touches the models directory.
async fn provision(args: &ArtifactArgs) -> Result<(), FetchError> {
    let provisioner = Provisioner::new(args.models_dir.clone());
    provisioner
        .ensure_all(&[
            Artifact::model(args.model_url.clone()),
            Artifact::tokenizer(args.tokenizer_url.clone()),
        ])
        .await
}

/// The threshold is a per-label probability; only values in [0, 1] parse.
fn parse_threshold(raw: &str) -> Result<f32, String> {
    let value: f32 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{raw} is not a probability in 0.0..=1.0"))
    }
}
