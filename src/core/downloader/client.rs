use std::path::PathBuf;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

use super::staged::StagedArtifact;
use crate::core::error::{ModError, ModResult};
use crate::core::registry::ModVersion;

/// Streams version artifacts into a per-call staging directory.
pub struct Downloader {
    client: Client,
    /// Root under which every fetch gets its own subdirectory.
    staging_root: PathBuf,
}

impl Downloader {
    pub fn new(client: Client, staging_root: PathBuf) -> Self {
        Self {
            client,
            staging_root,
        }
    }

    /// Download the first file of `version` into staging.
    ///
    /// The returned handle owns the staged file. A failed stream leaves no
    /// residue: the partial file is removed with its staging directory.
    pub async fn fetch_artifact(&self, version: &ModVersion) -> ModResult<StagedArtifact> {
        let file = version
            .first_file()
            .ok_or_else(|| ModError::NoArtifact(version.id.clone()))?;
        let url = file.url.as_str();
        validate_file_name(url, &file.filename)?;

        let dir = self.staging_root.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ModError::transfer(url, format!("cannot create {:?}: {e}", dir)))?;

        let mut staged = StagedArtifact::new(dir, &file.filename, &version.version_number);

        info!("Downloading {} ({})", file.filename, version.version_number);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ModError::transfer(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModError::transfer(url, format!("HTTP {}", status.as_u16())));
        }

        // Write inside a block so the handle is closed before the move.
        let written = {
            let mut out = tokio::fs::File::create(staged.path())
                .await
                .map_err(|e| ModError::transfer(url, e))?;

            let mut written = 0u64;
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| ModError::transfer(url, e))?;
                out.write_all(&chunk)
                    .await
                    .map_err(|e| ModError::transfer(url, e))?;
                written = written.saturating_add(chunk.len() as u64);
            }
            out.flush().await.map_err(|e| ModError::transfer(url, e))?;
            written
        };

        if let Some(expected) = file.size {
            if expected != written {
                return Err(ModError::transfer(
                    url,
                    format!("expected {expected} bytes, got {written}"),
                ));
            }
        }

        staged.set_bytes(written);
        debug!("Staged {} ({} bytes) at {:?}", url, written, staged.path());
        Ok(staged)
    }
}

/// The declared filename becomes a path component; refuse anything that
/// could escape the staging or mods directory.
fn validate_file_name(url: &str, name: &str) -> ModResult<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if bad {
        return Err(ModError::transfer(url, format!("unsafe file name '{name}'")));
    }
    Ok(())
}
