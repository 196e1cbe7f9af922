use crate::error::{RegistryError, Result};
use crate::manifest::Manifest;
use tracing::{debug, info};

/// Registry serving model manifests and blobs.
pub const DEFAULT_REGISTRY: &str = "registry.ollama.ai";

// ---------------------------------------------------------------------------
// RegistryClient
// ---------------------------------------------------------------------------

/// HTTP client for the model registry's manifest endpoint and URL builder
/// for its blob endpoint.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    host: String,
}

/// Return the base URL scheme for a registry host.
/// Localhost and loopback registries default to HTTP; everything else to HTTPS.
fn registry_scheme(registry: &str) -> &'static str {
    let host = if let Some(bracketed) = registry.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or(bracketed)
    } else if registry.matches(':').count() > 1 {
        registry
    } else {
        registry.split(':').next().unwrap_or(registry)
    };
    if host == "localhost" || host == "127.0.0.1" || host == "::1" {
        "http"
    } else {
        "https"
    }
}

impl RegistryClient {
    /// Client for [`DEFAULT_REGISTRY`].
    pub fn new() -> Result<Self> {
        Self::with_host(DEFAULT_REGISTRY)
    }

    /// Client for an explicit registry host (`host` or `host:port`).
    pub fn with_host(host: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ollama-pull/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            host: host.into(),
        })
    }

    /// Registry host this client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    // -- public API ---------------------------------------------------------

    /// `GET /v2/library/<name>/manifests/<tag>`
    pub fn manifest_url(&self, name: &str, tag: &str) -> String {
        format!(
            "{}://{}/v2/library/{}/manifests/{}",
            registry_scheme(&self.host),
            self.host,
            name,
            tag,
        )
    }

    /// `GET /v2/library/<name>/blobs/<digest>`
    pub fn blob_url(&self, name: &str, digest: &str) -> String {
        format!(
            "{}://{}/v2/library/{}/blobs/{}",
            registry_scheme(&self.host),
            self.host,
            name,
            digest,
        )
    }

    /// Fetch and decode the manifest for `name:tag`.
    ///
    /// Connection failures and non-2xx responses surface as transport
    /// errors; a body that is not a manifest surfaces as a decode error.
    pub async fn fetch_manifest(&self, name: &str, tag: &str) -> Result<Manifest> {
        let url = self.manifest_url(name, tag);
        info!(%url, "downloading model manifest");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RegistryError::Status { url, status });
        }

        let body = resp.bytes().await?;
        debug!(bytes = body.len(), "received manifest");
        let manifest: Manifest = serde_json::from_slice(&body)?;
        Ok(manifest)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
