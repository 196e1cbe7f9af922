/// Errors produced while pulling a model from the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid model reference: {0}")]
    InvalidReference(String),

    #[error("invalid download option: {0}")]
    InvalidTransport(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("GET {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<RegistryError>,
    },
}

impl RegistryError {
    /// Walk through `Context` wrappers and return the innermost error.
    pub fn root_cause(&self) -> &RegistryError {
        match self {
            RegistryError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Attach the failing phase to an error before it leaves a pull step.
pub trait Context<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T, E: Into<RegistryError>> Context<T> for std::result::Result<T, E> {
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|e| RegistryError::Context {
            context: context.to_string(),
            source: Box::new(e.into()),
        })
    }
}
