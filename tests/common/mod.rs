//! Shared fixtures: a mock registry serving one model.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use httpmock::prelude::*;
use httpmock::Mock;

pub const MODEL: &str = "deepseek-r1";
pub const TAG: &str = "14b";
pub const LAYERS: [&str; 2] = ["sha256:aaa", "sha256:bbb"];
pub const CONFIG: &str = "sha256:ccc";

pub fn manifest_json() -> String {
    serde_json::json!({
        "schemaVersion": 2,
        "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
        "config": {
            "mediaType": "application/vnd.docker.container.image.v1+json",
            "digest": CONFIG,
            "size": 10
        },
        "layers": [
            { "mediaType": "application/vnd.ollama.image.model", "digest": LAYERS[0], "size": 10 },
            { "mediaType": "application/vnd.ollama.image.params", "digest": LAYERS[1], "size": 10 }
        ]
    })
    .to_string()
}

pub fn blob_body(digest: &str) -> String {
    format!("blob {}", digest)
}

pub fn all_digests() -> [&'static str; 3] {
    [LAYERS[0], LAYERS[1], CONFIG]
}

/// Registry host string for the mock server (loopback, so plain HTTP).
pub fn registry_host(server: &MockServer) -> String {
    server.address().to_string()
}

pub async fn mock_manifest<'a>(server: &'a MockServer, body: &str) -> Mock<'a> {
    let body = body.to_string();
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v2/library/{}/manifests/{}", MODEL, TAG));
            then.status(200)
                .header("content-type", "application/json")
                .body(body);
        })
        .await
}

/// Serve every blob; `failing` digests answer 500 instead.
pub async fn mock_blobs<'a>(server: &'a MockServer, failing: &[&str]) -> Vec<Mock<'a>> {
    let mut mocks = Vec::new();
    for digest in all_digests() {
        let fail = failing.contains(&digest);
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/v2/library/{}/blobs/{}", MODEL, digest));
                if fail {
                    then.status(500).body("upstream exploded");
                } else {
                    then.status(200).body(blob_body(digest));
                }
            })
            .await;
        mocks.push(mock);
    }
    mocks
}

/// Every regular file under `root`, keyed by its path relative to `root`.
pub fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                out.insert(rel, std::fs::read(&path).unwrap());
            }
        }
    }

    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}
