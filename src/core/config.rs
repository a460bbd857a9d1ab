use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::compat::LoaderType;
use crate::core::error::{ModError, ModResult};
use crate::core::http::DEFAULT_USER_AGENT;
use crate::core::manifest::DEFAULT_MANIFEST_PATH;
use crate::core::registry::{DEFAULT_API_BASE, DEFAULT_SEARCH_LIMIT};

const APP_DIR_NAME: &str = "modfetch";

/// Client settings, loadable from a JSON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    pub manifest_path: PathBuf,
    pub staging_dir: PathBuf,
    /// Loader assumed for manifest entries that never recorded one.
    pub default_loader: LoaderType,
    pub search_limit: u32,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            staging_dir: default_staging_dir(),
            default_loader: LoaderType::Forge,
            search_limit: DEFAULT_SEARCH_LIMIT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> ModResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ModError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| ModError::Other(format!("Invalid config {:?}: {}", path, e)))
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }
}

fn default_staging_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|base| base.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR_NAME}")))
        .join("staging")
}
