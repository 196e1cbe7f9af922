use crate::error::{RegistryError, Result};
use std::path::{Path, PathBuf};

/// Tag implied when a reference carries no `:tag` suffix.
pub const DEFAULT_TAG: &str = "latest";

/// A validated model reference bound to the models directory it will be
/// pulled into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    /// Model name (e.g. "deepseek-r1").
    pub name: String,
    /// Tag (e.g. "14b"); "latest" when the input omitted it.
    pub tag: String,
    /// Root of the local models directory.
    pub base_dir: PathBuf,
}

impl ModelRef {
    /// Parse a raw model reference.
    ///
    /// Supported formats:
    /// - `deepseek-r1` (tag defaults to `latest`)
    /// - `deepseek-r1:14b`
    ///
    /// Only the first `:` separates name and tag; anything after it is the tag.
    pub fn parse(raw: &str, base_dir: impl AsRef<Path>) -> Result<Self> {
        let (name, tag) = match raw.split_once(':') {
            Some((_, "")) => {
                return Err(RegistryError::InvalidReference(
                    "tag syntax used without tag".to_string(),
                ))
            }
            Some((name, tag)) => (name, tag),
            None => (raw, DEFAULT_TAG),
        };

        if name.is_empty() {
            return Err(RegistryError::InvalidReference(
                "invalid model name".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
            base_dir: base_dir.as_ref().to_path_buf(),
        })
    }
}

impl std::fmt::Display for ModelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}
