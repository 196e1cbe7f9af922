use std::path::PathBuf;

use clap::Parser;
use ollama_pull::{run, PullConfig, PullOutcome};
use ollama_registry::{TransportKind, DEFAULT_REGISTRY};

/// Download a model from the Ollama registry into a models directory.
#[derive(Debug, Parser)]
#[command(name = "ollama-pull", version, about)]
struct Cli {
    /// Name of the model to download, `name` or `name:tag`
    model: String,

    /// Models directory
    #[arg(short, long, env = "OLLAMA_MODELS")]
    directory: PathBuf,

    /// Downloader type (aria|http); defaults to aria when aria2c is on PATH
    #[arg(long)]
    downloader: Option<TransportKind>,

    /// Registry host
    #[arg(long, default_value = DEFAULT_REGISTRY, hide = true)]
    registry: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = PullConfig::new(cli.model, cli.directory)
        .downloader(cli.downloader.unwrap_or_else(TransportKind::detect))
        .registry_host(cli.registry);

    match run(&config).await {
        Ok(PullOutcome::AlreadyPulled { manifest }) => {
            tracing::debug!(manifest = %manifest.display(), "nothing to do");
            Ok(())
        }
        Ok(PullOutcome::Pulled { manifest, blobs }) => {
            tracing::debug!(manifest = %manifest.display(), blobs, "pull complete");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "failed pulling the model");
            Err(e.into())
        }
    }
}
