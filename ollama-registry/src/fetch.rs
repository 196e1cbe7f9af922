//! Fan-out/fan-in download of a model's blob set.

use crate::blob::Blob;
use crate::error::{Context, RegistryError, Result};
use crate::layout::{self, Layout};
use crate::registry::RegistryClient;
use crate::transport::Transport;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Download every blob concurrently, one task per blob.
///
/// All tasks run to completion even after one fails; the first failure
/// observed is returned and any later ones are only logged.  Blobs that were
/// written before the failure stay on disk.
pub async fn fetch_all(
    blobs: Vec<Blob>,
    model_name: &str,
    registry: &RegistryClient,
    transport: Arc<dyn Transport>,
    layout: &Layout,
) -> Result<()> {
    let mut join_set = JoinSet::new();
    for blob in blobs {
        let url = registry.blob_url(model_name, &blob.digest);
        let path = layout.blob_path(&blob.digest);
        let transport = transport.clone();

        join_set.spawn(async move {
            info!(digest = %blob.digest, size = blob.size, "downloading blob");
            layout::ensure_parent(&path)
                .await
                .context("failed to create blobs directory")?;
            transport
                .download(&url, &path)
                .await
                .context(&format!("failed to download blob {}", blob.digest))
        });
    }

    let mut first_error: Option<RegistryError> = None;
    while let Some(joined) = join_set.join_next().await {
        let result = joined
            .map_err(|e| RegistryError::Transport(format!("blob task failed: {}", e)))
            .and_then(|r| r);

        if let Err(e) = result {
            if first_error.is_none() {
                first_error = Some(e);
            } else {
                warn!(error = %e, "additional blob download failed");
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Writes the URL as the blob body and fails for one chosen digest.
    #[derive(Default)]
    struct RecordingTransport {
        fail_digest: Option<String>,
        calls: Mutex<Vec<(String, PathBuf)>>,
    }

    #[async_trait::async_trait]
    impl Transport for RecordingTransport {
        async fn download(&self, url: &str, output: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), output.to_path_buf()));
            if let Some(ref digest) = self.fail_digest {
                if url.ends_with(digest.as_str()) {
                    return Err(RegistryError::Transport("simulated failure".into()));
                }
            }
            tokio::fs::write(output, url.as_bytes()).await?;
            Ok(())
        }
    }

    fn blobs(digests: &[&str]) -> Vec<Blob> {
        digests
            .iter()
            .map(|d| Blob {
                digest: d.to_string(),
                size: 1,
            })
            .collect()
    }

    #[tokio::test]
    async fn fetches_every_blob_into_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path(), "registry.ollama.ai");
        let registry = RegistryClient::new().unwrap();
        let transport = Arc::new(RecordingTransport::default());

        fetch_all(
            blobs(&["sha256:aaa", "sha256:bbb", "sha256:ccc"]),
            "deepseek-r1",
            &registry,
            transport.clone(),
            &layout,
        )
        .await
        .unwrap();

        let mut calls = transport.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            (
                "https://registry.ollama.ai/v2/library/deepseek-r1/blobs/sha256:aaa".to_string(),
                tmp.path().join("blobs").join("sha256:aaa"),
            )
        );
        for digest in ["sha256:aaa", "sha256:bbb", "sha256:ccc"] {
            assert!(layout.blob_path(digest).is_file());
        }
    }

    #[tokio::test]
    async fn first_failure_is_reported_and_siblings_finish() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path(), "registry.ollama.ai");
        let registry = RegistryClient::new().unwrap();
        let transport = Arc::new(RecordingTransport {
            fail_digest: Some("sha256:bbb".to_string()),
            ..Default::default()
        });

        let err = fetch_all(
            blobs(&["sha256:aaa", "sha256:bbb", "sha256:ccc"]),
            "deepseek-r1",
            &registry,
            transport.clone(),
            &layout,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("sha256:bbb"));
        assert!(matches!(err.root_cause(), RegistryError::Transport(_)));
        assert_eq!(transport.calls.lock().unwrap().len(), 3);
        assert!(layout.blob_path("sha256:aaa").is_file());
        assert!(layout.blob_path("sha256:ccc").is_file());
        assert!(!layout.blob_path("sha256:bbb").exists());
    }

    #[tokio::test]
    async fn empty_blob_set_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path(), "registry.ollama.ai");
        let registry = RegistryClient::new().unwrap();
        let transport = Arc::new(RecordingTransport::default());

        fetch_all(Vec::new(), "llama3", &registry, transport, &layout)
            .await
            .unwrap();
        assert!(!tmp.path().join("blobs").exists());
    }
}
