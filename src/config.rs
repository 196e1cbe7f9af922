//! Run configuration.

use crate::error::{Error, Result};
use ollama_registry::{TransportKind, DEFAULT_REGISTRY};
use std::path::PathBuf;

/// Everything needed to pull one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullConfig {
    /// Model reference, `name` or `name:tag`.
    pub model: String,
    /// Models directory (what Ollama calls `OLLAMA_MODELS`).
    pub models_dir: PathBuf,
    /// Download mechanism for blobs.
    pub downloader: TransportKind,
    /// Registry host, `host` or `host:port`.
    pub registry_host: String,
}

impl PullConfig {
    /// Config with the default registry and an auto-detected downloader.
    pub fn new(model: impl Into<String>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            models_dir: models_dir.into(),
            downloader: TransportKind::detect(),
            registry_host: DEFAULT_REGISTRY.to_string(),
        }
    }

    pub fn downloader(mut self, kind: TransportKind) -> Self {
        self.downloader = kind;
        self
    }

    pub fn registry_host(mut self, host: impl Into<String>) -> Self {
        self.registry_host = host.into();
        self
    }

    /// Reject configurations that cannot produce a usable layout.
    pub fn validate(&self) -> Result<()> {
        if self.models_dir.as_os_str().is_empty() {
            return Err(Error::Config("models directory is required".into()));
        }
        if self.registry_host.trim().is_empty() {
            return Err(Error::Config("registry host must not be empty".into()));
        }
        Ok(())
    }
}
