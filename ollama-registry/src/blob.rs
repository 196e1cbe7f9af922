use crate::manifest::Manifest;

/// A blob that must be present locally for a model to be usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Content-addressable digest (e.g. "sha256:abcdef…").
    pub digest: String,
    /// Declared size in bytes.
    pub size: u64,
}

/// Derive the blob set of a manifest: every layer in manifest order, then
/// the config blob.  Duplicate digests are kept.
pub fn resolve(manifest: &Manifest) -> Vec<Blob> {
    let mut blobs = Vec::with_capacity(manifest.layers.len() + 1);
    blobs.extend(manifest.layers.iter().map(|layer| Blob {
        digest: layer.digest.clone(),
        size: layer.size,
    }));
    blobs.push(Blob {
        digest: manifest.config.digest.clone(),
        size: manifest.config.size,
    });
    blobs
}
