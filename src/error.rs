//! Error types for ollama-pull

use thiserror::Error;

/// Result type alias using ollama-pull Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a pull
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registry, transport and filesystem errors from the pull itself
    #[error(transparent)]
    Registry(#[from] ollama_registry::RegistryError),
}
