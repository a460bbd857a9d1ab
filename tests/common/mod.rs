#![allow(dead_code)]

use std::path::{Path, PathBuf};

use httpmock::prelude::*;
use httpmock::Mock;
use modfetch_lib::{ClientConfig, ModClient};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Scratch layout for one test: manifest, staging root and mods dir.
pub struct TestEnv {
    pub tmp: TempDir,
    pub manifest: PathBuf,
    pub staging: PathBuf,
    pub mods: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        Self {
            manifest: root.join("mods.json"),
            staging: root.join("staging"),
            mods: root.join("mods"),
            tmp,
        }
    }

    pub fn client(&self, server: &MockServer) -> ModClient {
        let config = ClientConfig::default()
            .with_api_base(server.base_url())
            .with_manifest_path(&self.manifest)
            .with_staging_dir(&self.staging);
        ModClient::new(config).unwrap()
    }

    pub fn write_manifest(&self, value: Value) {
        std::fs::write(&self.manifest, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    pub fn read_manifest(&self) -> Value {
        serde_json::from_str(&std::fs::read_to_string(&self.manifest).unwrap()).unwrap()
    }

    /// Files anywhere under the staging root.
    pub fn staged_files(&self) -> usize {
        count_files(&self.staging)
    }
}

fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|e| {
            let path = e.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

pub fn version_json(
    server: &MockServer,
    id: &str,
    number: &str,
    games: &[&str],
    loaders: &[&str],
    filename: &str,
) -> Value {
    json!({
        "id": id,
        "project_id": "proj",
        "name": number,
        "version_number": number,
        "game_versions": games,
        "loaders": loaders,
        "files": [{
            "url": server.url(format!("/cdn/{filename}")),
            "filename": filename,
            "primary": true
        }]
    })
}

pub async fn mock_search<'a>(
    server: &'a MockServer,
    query: &str,
    hits: Value,
) -> Mock<'a> {
    let query = query.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET)
                .path("/search")
                .query_param("query", &query)
                .query_param("limit", "10");
            then.status(200).json_body(json!({ "hits": hits }));
        })
        .await
}

pub async fn mock_project<'a>(
    server: &'a MockServer,
    name: &str,
    project_id: &str,
    versions: Vec<Value>,
) -> Mock<'a> {
    mock_search(
        server,
        name,
        json!([{ "project_id": project_id, "title": name, "slug": name }]),
    )
    .await;

    for version in &versions {
        let id = version["id"].as_str().unwrap().to_string();
        let body = version.clone();
        server
            .mock_async(move |when, then| {
                when.method(GET).path(format!("/version/{id}"));
                then.status(200).json_body(body);
            })
            .await;
    }

    let path = format!("/project/{project_id}/version");
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(200).json_body(Value::Array(versions));
        })
        .await
}

pub async fn mock_artifact<'a>(server: &'a MockServer, filename: &str, body: &[u8]) -> Mock<'a> {
    let path = format!("/cdn/{filename}");
    let body = body.to_vec();
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(200).body(body);
        })
        .await
}
