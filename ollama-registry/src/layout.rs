use crate::error::Result;
use crate::model_ref::ModelRef;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// On-disk layout of a models directory:
///
/// - `<base>/manifests/<registry-host>/library/<name>/<tag>`
/// - `<base>/blobs/<digest>`
#[derive(Debug, Clone)]
pub struct Layout {
    base_dir: PathBuf,
    registry_host: String,
}

impl Layout {
    pub fn new(base_dir: impl Into<PathBuf>, registry_host: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            registry_host: registry_host.into(),
        }
    }

    /// Layout rooted at the model's own base directory.
    pub fn for_model(model: &ModelRef, registry_host: &str) -> Self {
        Self::new(model.base_dir.clone(), registry_host)
    }

    /// Path of the manifest file for `name:tag`.
    pub fn manifest_path(&self, name: &str, tag: &str) -> PathBuf {
        self.base_dir
            .join("manifests")
            .join(&self.registry_host)
            .join("library")
            .join(name)
            .join(tag)
    }

    /// Path of the blob file for `digest`.  The digest is used verbatim as
    /// the file name.
    pub fn blob_path(&self, digest: &str) -> PathBuf {
        self.base_dir.join("blobs").join(digest)
    }

    /// Whether a manifest for `name:tag` is already on disk.
    pub fn has_manifest(&self, name: &str, tag: &str) -> bool {
        self.manifest_path(name, tag).exists()
    }
}

/// Create the parent directory of `path` (and its ancestors) if missing.
pub async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
        debug!(dir = %parent.display(), "ensured directory");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
