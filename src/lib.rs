//! ollama-pull: download models from the Ollama registry into a local
//! models directory, without running an Ollama server.
//!
//! The layout written is the one Ollama itself reads:
//! `manifests/<registry>/library/<name>/<tag>` plus `blobs/<digest>`.
//!
//! # Example
//!
//! ```no_run
//! use ollama_pull::{config::PullConfig, run};
//! use ollama_registry::TransportKind;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PullConfig::new("deepseek-r1:14b", "/data/models")
//!         .downloader(TransportKind::Http);
//!     let outcome = run(&config).await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::PullConfig;
pub use error::{Error, Result};
pub use ollama_registry::PullOutcome;

use ollama_registry::{transport, ModelPuller, ModelRef, RegistryClient};
use tracing::debug;

/// Pull the model described by `config`.
pub async fn run(config: &PullConfig) -> Result<PullOutcome> {
    config.validate()?;

    let transport = transport::new(config.downloader)
        .map_err(|e| Error::Config(format!("failed to initialize downloader: {}", e)))?;
    debug!(downloader = %config.downloader, "transport selected");

    let model = ModelRef::parse(&config.model, &config.models_dir)?;
    let registry = RegistryClient::with_host(config.registry_host.clone())?;

    let outcome = ModelPuller::new(registry, transport).pull(&model).await?;
    Ok(outcome)
}

