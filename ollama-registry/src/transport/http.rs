use super::Transport;
use crate::error::{Context, RegistryError, Result};
use futures_util::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Direct download: GET the URL and stream the body into the output file.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ollama-pull/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn download(&self, url: &str, output: &Path) -> Result<()> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                url: url.to_string(),
                status,
            });
        }

        let mut file = tokio::fs::File::create(output)
            .await
            .context("failed to create blob file")?;

        // Pre-sizing is only a hint to the filesystem.
        if let Some(len) = resp.content_length() {
            if let Err(e) = file.set_len(len).await {
                warn!(path = %output.display(), error = %e, "failed to truncate file");
            }
        }

        info!(%url, "writing blob to disk");
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("failed to write blob to file")?;
            file.write_all(&chunk)
                .await
                .context("failed to write blob to file")?;
        }
        file.flush().await.context("failed to write blob to file")?;
        Ok(())
    }
}
