// ─── Mod Client ───
// Composes registry lookups, artifact transfer and the manifest into the
// download / update flows. Every step is awaited before the next starts.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::core::compat::{filter_compatible, CompatibilityQuery, LoaderType};
use crate::core::config::ClientConfig;
use crate::core::downloader::{Downloader, StagedArtifact};
use crate::core::error::{ModError, ModResult};
use crate::core::http::build_http_client;
use crate::core::manifest::{InstalledMod, ManifestStore};
use crate::core::registry::{ModSummary, ModVersion, RegistryClient};

/// Outcome of resolving a mod name against a compatibility query.
#[derive(Debug, Clone)]
pub enum Resolution {
    Found {
        summary: ModSummary,
        version: ModVersion,
    },
    NotFound {
        query: String,
    },
    NoCompatibleVersion {
        project: String,
        query: String,
    },
}

impl Resolution {
    pub fn into_result(self) -> ModResult<(ModSummary, ModVersion)> {
        match self {
            Resolution::Found { summary, version } => Ok((summary, version)),
            Resolution::NotFound { query } => Err(ModError::NotFound(query)),
            Resolution::NoCompatibleVersion { project, query } => {
                Err(ModError::NoCompatibleVersion { project, query })
            }
        }
    }
}

/// One mod replaced by `update_all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedMod {
    pub name: String,
    pub from: String,
    pub to: String,
}

pub struct ModClient {
    config: ClientConfig,
    registry: RegistryClient,
    downloader: Downloader,
    manifest: ManifestStore,
}

impl ModClient {
    pub fn new(config: ClientConfig) -> ModResult<Self> {
        let http = build_http_client(&config.user_agent)
            .map_err(|e| ModError::Other(format!("Failed to build HTTP client: {e}")))?;

        let registry = RegistryClient::new(http.clone(), config.api_base.clone())
            .with_search_limit(config.search_limit);
        let downloader = Downloader::new(http, config.staging_dir.clone());
        let manifest = ManifestStore::new(config.manifest_path.clone());

        Ok(Self {
            config,
            registry,
            downloader,
            manifest,
        })
    }

    /// Default settings with the manifest at `path`.
    pub fn with_manifest_path(path: impl Into<PathBuf>) -> ModResult<Self> {
        Self::new(ClientConfig::default().with_manifest_path(path))
    }

    pub fn set_manifest_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!("Manifest path set to {:?}", path);
        self.config.manifest_path = path.clone();
        self.manifest = ManifestStore::new(path);
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn registry(&self) -> &RegistryClient {
        &self.registry
    }

    pub fn manifest(&self) -> &ManifestStore {
        &self.manifest
    }

    pub async fn get_info_by_name(&self, name: &str) -> ModResult<ModSummary> {
        self.registry.get_info_by_name(name).await
    }

    /// Every version of the top hit for `name` matching `target`.
    pub async fn get_compatible_versions(
        &self,
        name: &str,
        target: &str,
        loader: LoaderType,
    ) -> ModResult<Vec<ModVersion>> {
        let query = CompatibilityQuery::parse(target, loader);
        let summary = self.registry.get_info_by_name(name).await?;
        let versions = self.registry.list_versions(&summary.project_id).await?;
        filter_compatible(&summary.title, versions, &query)
    }

    /// Search, list and filter. Not-found outcomes are returned as variants;
    /// only transport and registry failures are errors.
    pub async fn resolve(&self, name: &str, query: &CompatibilityQuery) -> ModResult<Resolution> {
        let summary = match self.registry.get_info_by_name(name).await {
            Ok(summary) => summary,
            Err(ModError::NotFound(query)) => return Ok(Resolution::NotFound { query }),
            Err(e) => return Err(e),
        };

        let versions = self.registry.list_versions(&summary.project_id).await?;
        match filter_compatible(&summary.title, versions, query) {
            Ok(mut compatible) => {
                let version = compatible.swap_remove(0);
                debug!(
                    "Latest {} for {} is {}",
                    summary.title, query, version.version_number
                );
                Ok(Resolution::Found { summary, version })
            }
            Err(ModError::NoCompatibleVersion { project, query }) => {
                Ok(Resolution::NoCompatibleVersion { project, query })
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve `name`, install the newest matching version into `target_dir`
    /// and record it in the manifest.
    ///
    /// Nothing is rolled back on failure; the manifest is only written after
    /// the artifact is in place.
    pub async fn download(
        &self,
        name: &str,
        target: &str,
        loader: LoaderType,
        target_dir: &Path,
    ) -> ModResult<InstalledMod> {
        let query = CompatibilityQuery::parse(target, loader);
        info!("Downloading '{}' for {}", name, query);

        let (_, chosen) = self.resolve(name, &query).await?.into_result()?;
        let staged = self.stage(&chosen).await?;
        let file_name = staged.file_name().to_string();
        let version = staged.version_number().to_string();
        staged.install(target_dir).await?;

        let entry = InstalledMod::new(version)
            .with_loader(loader)
            .with_game_version(query.game_version())
            .with_file_name(file_name)
            .installed_now();
        self.manifest.save(name, entry.clone()).await?;
        Ok(entry)
    }

    /// Bring every manifest entry up to the newest version for
    /// `game_version`.
    ///
    /// Entries use the loader they were installed with, or the configured
    /// default for entries that never recorded one. The first failure aborts
    /// the run.
    pub async fn update_all(
        &self,
        target_dir: &Path,
        game_version: &str,
    ) -> ModResult<Vec<UpdatedMod>> {
        let manifest = self.manifest.load().await?;
        let mut updated = Vec::new();

        if manifest.is_empty() {
            info!("Manifest {:?} is empty, nothing to update", self.manifest.path());
            return Ok(updated);
        }

        for (name, current) in manifest {
            let loader = current.loader.unwrap_or(self.config.default_loader);
            let query = CompatibilityQuery::GameVersion {
                game_version: game_version.to_string(),
                loader,
            };

            let (_, latest) = self.resolve(&name, &query).await?.into_result()?;
            if latest.version_number == current.version {
                debug!("{} is up to date ({})", name, current.version);
                continue;
            }

            info!(
                "Updating {}: {} -> {}",
                name, current.version, latest.version_number
            );

            let staged = self.stage(&latest).await?;
            self.manifest.remove_installed_file(&name, target_dir).await?;
            let file_name = staged.file_name().to_string();
            let version = staged.version_number().to_string();
            staged.install(target_dir).await?;

            let entry = InstalledMod::new(version.clone())
                .with_loader(loader)
                .with_game_version(Some(game_version))
                .with_file_name(file_name)
                .installed_now();
            self.manifest.save(&name, entry).await?;

            updated.push(UpdatedMod {
                name,
                from: current.version,
                to: version,
            });
        }

        info!("Update finished: {} mod(s) replaced", updated.len());
        Ok(updated)
    }

    /// Refresh the version's file list, then stream its artifact to staging.
    async fn stage(&self, version: &ModVersion) -> ModResult<StagedArtifact> {
        let fresh = self.registry.get_version(&version.id).await?;
        self.downloader.fetch_artifact(&fresh).await
    }
}
