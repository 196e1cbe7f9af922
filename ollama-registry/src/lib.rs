pub mod blob;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod manifest;
pub mod model_ref;
pub mod registry;
pub mod transport;

pub use error::{Context, RegistryError, Result};
pub use layout::Layout;
pub use manifest::{BlobRef, Manifest};
pub use model_ref::ModelRef;
pub use registry::{RegistryClient, DEFAULT_REGISTRY};
pub use transport::{Transport, TransportKind};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Model client -- pulls manifests and blobs into a models directory.
pub struct ModelPuller {
    registry: RegistryClient,
    transport: Arc<dyn Transport>,
}

/// What a successful [`ModelPuller::pull`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    /// A manifest was already present; nothing was fetched.
    AlreadyPulled { manifest: PathBuf },
    /// The manifest and `blobs` blobs were fetched and written.
    Pulled { manifest: PathBuf, blobs: usize },
}

impl ModelPuller {
    pub fn new(registry: RegistryClient, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Pull `model` into its base directory.
    ///
    /// The manifest file is the only completion marker: if it exists the pull
    /// is skipped, and it is written only after every blob has been fetched.
    pub async fn pull(&self, model: &ModelRef) -> Result<PullOutcome> {
        let started = Instant::now();
        let layout = Layout::for_model(model, self.registry.host());
        let manifest_path = layout.manifest_path(&model.name, &model.tag);

        if layout.has_manifest(&model.name, &model.tag) {
            warn!(file = %manifest_path.display(), "manifest file already exists");
            return Ok(PullOutcome::AlreadyPulled {
                manifest: manifest_path,
            });
        }

        info!(model = %model, registry = %self.registry.host(), "pulling model");

        // 1. Manifest.
        let manifest = self
            .registry
            .fetch_manifest(&model.name, &model.tag)
            .await
            .context("failed to download model manifest")?;

        // 2. Blobs (layers + config).
        let blobs = blob::resolve(&manifest);
        let blob_count = blobs.len();
        fetch::fetch_all(
            blobs,
            &model.name,
            &self.registry,
            self.transport.clone(),
            &layout,
        )
        .await
        .context("failed to download blobs")?;

        // 3. Manifest last, so its presence implies the blobs are there.
        layout::ensure_parent(&manifest_path)
            .await
            .context("failed to create manifest directory")?;
        let bytes = manifest
            .to_json_bytes()
            .context("failed to encode manifest")?;
        tokio::fs::write(&manifest_path, bytes)
            .await
            .context("failed to write manifest file")?;

        info!(
            model = %model,
            blobs = blob_count,
            elapsed = %humantime::format_duration(round_to_millis(started.elapsed())),
            "model pulled",
        );

        Ok(PullOutcome::Pulled {
            manifest: manifest_path,
            blobs: blob_count,
        })
    }
}

fn round_to_millis(d: std::time::Duration) -> std::time::Duration {
    std::time::Duration::from_millis(d.as_millis() as u64)
}
