use crate::core::error::{ModError, ModResult};
use crate::core::registry::ModVersion;

use super::loader::LoaderType;

/// What the caller wants a version to match.
///
/// A target containing `-` is read as an exact version number (e.g.
/// `mc1.20.1-0.5.1.f`), anything else as a game version paired with a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompatibilityQuery {
    ExactVersion(String),
    GameVersion {
        game_version: String,
        loader: LoaderType,
    },
}

impl CompatibilityQuery {
    pub fn parse(target: &str, loader: LoaderType) -> Self {
        if target.contains('-') {
            CompatibilityQuery::ExactVersion(target.to_string())
        } else {
            CompatibilityQuery::GameVersion {
                game_version: target.to_string(),
                loader,
            }
        }
    }

    pub fn matches(&self, version: &ModVersion) -> bool {
        match self {
            CompatibilityQuery::ExactVersion(number) => version.version_number == *number,
            CompatibilityQuery::GameVersion {
                game_version,
                loader,
            } => {
                version.supports_game_version(game_version)
                    && version.supports_loader(loader.as_str())
            }
        }
    }

    /// Game version this query pins, if any.
    pub fn game_version(&self) -> Option<&str> {
        match self {
            CompatibilityQuery::ExactVersion(_) => None,
            CompatibilityQuery::GameVersion { game_version, .. } => Some(game_version),
        }
    }
}

impl std::fmt::Display for CompatibilityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompatibilityQuery::ExactVersion(number) => write!(f, "{number}"),
            CompatibilityQuery::GameVersion {
                game_version,
                loader,
            } => write!(f, "{game_version} ({loader})"),
        }
    }
}

/// Versions matching `query`, registry order preserved.
///
/// The first element is taken as the latest; no semver comparison happens.
pub fn filter_compatible(
    project: &str,
    versions: Vec<ModVersion>,
    query: &CompatibilityQuery,
) -> ModResult<Vec<ModVersion>> {
    let compatible: Vec<ModVersion> = versions.into_iter().filter(|v| query.matches(v)).collect();

    if compatible.is_empty() {
        return Err(ModError::NoCompatibleVersion {
            project: project.to_string(),
            query: query.to_string(),
        });
    }

    Ok(compatible)
}
