use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::compat::LoaderType;

/// What the manifest remembers about one installed mod.
///
/// On disk an entry is either a bare version string (`"5.1.11"`) or an
/// object carrying the install context. Entries with no context are written
/// back as bare strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry", into = "RawEntry")]
pub struct InstalledMod {
    pub version: String,
    pub loader: Option<LoaderType>,
    pub game_version: Option<String>,
    /// Name of the jar inside the mods directory.
    pub file_name: Option<String>,
    pub installed_at: Option<DateTime<Utc>>,
}

impl InstalledMod {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            loader: None,
            game_version: None,
            file_name: None,
            installed_at: None,
        }
    }

    pub fn with_loader(mut self, loader: LoaderType) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_game_version(mut self, game_version: Option<&str>) -> Self {
        self.game_version = game_version.map(str::to_string);
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn installed_now(mut self) -> Self {
        self.installed_at = Some(Utc::now());
        self
    }

    fn is_bare(&self) -> bool {
        self.loader.is_none()
            && self.game_version.is_none()
            && self.file_name.is_none()
            && self.installed_at.is_none()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Version(String),
    Detailed(DetailedEntry),
}

#[derive(Serialize, Deserialize)]
struct DetailedEntry {
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    loader: Option<LoaderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    game_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    installed_at: Option<DateTime<Utc>>,
}

impl From<RawEntry> for InstalledMod {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Version(version) => InstalledMod::new(version),
            RawEntry::Detailed(d) => InstalledMod {
                version: d.version,
                loader: d.loader,
                game_version: d.game_version,
                file_name: d.file_name,
                installed_at: d.installed_at,
            },
        }
    }
}

impl From<InstalledMod> for RawEntry {
    fn from(entry: InstalledMod) -> Self {
        if entry.is_bare() {
            return RawEntry::Version(entry.version);
        }
        RawEntry::Detailed(DetailedEntry {
            version: entry.version,
            loader: entry.loader,
            game_version: entry.game_version,
            file_name: entry.file_name,
            installed_at: entry.installed_at,
        })
    }
}
