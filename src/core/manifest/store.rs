use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::entry::InstalledMod;
use crate::core::error::{ModError, ModResult};

pub const DEFAULT_MANIFEST_PATH: &str = "./mods.json";

/// Installed mods keyed by the name they were requested under.
pub type Manifest = BTreeMap<String, InstalledMod>;

/// JSON manifest on disk.
///
/// Every mutation is a plain read-modify-write with no locking: two writers
/// racing on the same file can lose an update.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl Default for ManifestStore {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_PATH)
    }
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current manifest; empty when the file does not exist yet.
    pub async fn load(&self) -> ModResult<Manifest> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No manifest at {:?}, starting empty", self.path);
                return Ok(Manifest::new());
            }
            Err(source) => {
                return Err(ModError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(Manifest::new());
        }

        serde_json::from_str(&raw).map_err(|source| ModError::CorruptManifest {
            path: self.path.clone(),
            source,
        })
    }

    /// Record `entry` under `name`, keeping every other entry.
    pub async fn save(&self, name: &str, entry: InstalledMod) -> ModResult<()> {
        let mut manifest = self.load().await?;
        info!("Recording {} = {} in {:?}", name, entry.version, self.path);
        manifest.insert(name.to_string(), entry);
        self.write(&manifest).await
    }

    /// Drop `name` from the manifest. Returns the removed entry.
    pub async fn remove(&self, name: &str) -> ModResult<Option<InstalledMod>> {
        let mut manifest = self.load().await?;
        let removed = manifest.remove(name);
        if removed.is_some() {
            self.write(&manifest).await?;
        }
        Ok(removed)
    }

    /// Delete the installed jar for `name` from `mods_dir`.
    ///
    /// Uses the recorded file name when there is one, otherwise the key
    /// itself. A missing file is not an error. Returns whether a file was
    /// deleted.
    pub async fn remove_installed_file(&self, name: &str, mods_dir: &Path) -> ModResult<bool> {
        let manifest = self.load().await?;
        let file_name = manifest
            .get(name)
            .and_then(|e| e.file_name.as_deref())
            .unwrap_or(name);

        let path_like = file_name.is_empty()
            || file_name == "."
            || file_name == ".."
            || file_name.contains('/')
            || file_name.contains('\\');
        if path_like {
            warn!("Refusing to delete path-like entry {:?}", file_name);
            return Ok(false);
        }

        let path = mods_dir.join(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Removed old file {:?}", path);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Nothing to remove at {:?}", path);
                Ok(false)
            }
            Err(source) => Err(ModError::Io { path, source }),
        }
    }

    async fn write(&self, manifest: &Manifest) -> ModResult<()> {
        let json = serde_json::to_string_pretty(manifest)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ModError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| ModError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
