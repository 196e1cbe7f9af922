//! Pluggable "fetch URL to file" mechanisms.
//!
//! A transport is selected once from configuration and then shared by every
//! blob task of a pull, so the fetch orchestration never knows which one it
//! is talking to.

mod aria;
mod http;

pub use aria::AriaTransport;
pub use http::HttpTransport;

use crate::error::{RegistryError, Result};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Fetch the bytes behind `url` and write them to `output`, replacing any
/// existing file.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn download(&self, url: &str, output: &Path) -> Result<()>;
}

/// Which transport to use, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Delegate to an external `aria2c` process.
    Aria,
    /// Stream the response body directly with reqwest.
    Http,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Aria => "aria",
            TransportKind::Http => "http",
        }
    }

    /// `Aria` when an `aria2c` executable is on `PATH`, otherwise `Http`.
    pub fn detect() -> Self {
        if aria::locate_executable(aria::ARIA2C).is_some() {
            TransportKind::Aria
        } else {
            TransportKind::Http
        }
    }
}

impl FromStr for TransportKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aria" => Ok(TransportKind::Aria),
            "http" => Ok(TransportKind::Http),
            other => Err(RegistryError::InvalidTransport(other.to_string())),
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the transport for `kind`.  Fails if `aria` is requested and no
/// `aria2c` executable can be found.
pub fn new(kind: TransportKind) -> Result<Arc<dyn Transport>> {
    match kind {
        TransportKind::Aria => Ok(Arc::new(AriaTransport::new()?)),
        TransportKind::Http => Ok(Arc::new(HttpTransport::new()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!("aria".parse::<TransportKind>().unwrap(), TransportKind::Aria);
        assert_eq!("http".parse::<TransportKind>().unwrap(), TransportKind::Http);
    }

    #[test]
    fn parse_unknown_kind_fails() {
        let err = "curl".parse::<TransportKind>().unwrap_err();
        assert_eq!(err.to_string(), "invalid download option: curl");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in [TransportKind::Aria, TransportKind::Http] {
            assert_eq!(kind.to_string().parse::<TransportKind>().unwrap(), kind);
        }
    }

    #[test]
    fn http_transport_always_builds() {
        assert!(new(TransportKind::Http).is_ok());
    }
}
