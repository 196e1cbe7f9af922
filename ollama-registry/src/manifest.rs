use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Model Manifest
// ---------------------------------------------------------------------------

/// A model manifest as served by the registry and persisted under
/// `manifests/`.  It is decoded once per pull and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,

    #[serde(rename = "mediaType", default)]
    pub media_type: String,

    pub config: BlobRef,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub layers: Vec<BlobRef>,
}

/// Registries may send `"layers": null` for a config-only manifest.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<BlobRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<BlobRef>>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// BlobRef
// ---------------------------------------------------------------------------

/// A content-addressed reference to a blob (config or layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    #[serde(rename = "mediaType", default)]
    pub media_type: String,

    pub digest: String,

    #[serde(default)]
    pub size: u64,
}

impl Manifest {
    /// Serialize the manifest for the on-disk copy, newline terminated.
    pub fn to_json_bytes(&self) -> crate::Result<Vec<u8>> {
        let mut out = serde_json::to_vec(self)?;
        out.push(b'\n');
        Ok(out)
    }
}
