use serde::{Deserialize, Serialize};

/// A project as returned by the registry search endpoint.
///
/// `raw` keeps the untouched search hit so callers can read fields this
/// client does not model (downloads, icon, categories, ...).
#[derive(Debug, Clone, Serialize)]
pub struct ModSummary {
    pub project_id: String,
    pub title: String,
    pub slug: Option<String>,
    pub raw: serde_json::Value,
}

/// Fields pulled out of a search hit.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<serde_json::Value>,
}

impl ModSummary {
    pub(crate) fn from_hit(raw: serde_json::Value) -> serde_json::Result<Self> {
        let hit: SearchHit = serde_json::from_value(raw.clone())?;
        Ok(Self {
            project_id: hit.project_id,
            title: hit.title,
            slug: hit.slug,
            raw,
        })
    }
}

/// One published version of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModVersion {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub version_number: String,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

/// Downloadable artifact attached to a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFile {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub size: Option<u64>,
}

impl ModVersion {
    /// First listed file. Multi-file versions are not disambiguated.
    pub fn first_file(&self) -> Option<&VersionFile> {
        self.files.first()
    }

    pub fn supports_game_version(&self, game_version: &str) -> bool {
        self.game_versions.iter().any(|v| v == game_version)
    }

    pub fn supports_loader(&self, loader: &str) -> bool {
        self.loaders.iter().any(|l| l == loader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_version_ignores_unknown_fields() {
        let json = r#"{
            "id": "IQ4Jz1Oc",
            "project_id": "LNytGWDc",
            "name": "Create 5.1.12",
            "version_number": "5.1.12",
            "version_type": "release",
            "downloads": 12345,
            "game_versions": ["1.18.2"],
            "loaders": ["forge"],
            "files": [{
                "url": "https://cdn.example.com/create-1.18.2-0.5.1.12.jar",
                "filename": "create-1.18.2-0.5.1.12.jar",
                "primary": true,
                "size": 1024,
                "hashes": { "sha1": "abc" }
            }]
        }"#;
        let version: ModVersion = serde_json::from_str(json).unwrap();
        assert_eq!(version.version_number, "5.1.12");
        assert!(version.supports_game_version("1.18.2"));
        assert!(version.supports_loader("forge"));
        assert!(!version.supports_loader("fabric"));
        assert_eq!(
            version.first_file().map(|f| f.filename.as_str()),
            Some("create-1.18.2-0.5.1.12.jar")
        );
    }

    #[test]
    fn summary_keeps_raw_hit() {
        let raw = serde_json::json!({
            "project_id": "AANobbMI",
            "title": "Sodium",
            "slug": "sodium",
            "downloads": 100
        });
        let summary = ModSummary::from_hit(raw.clone()).unwrap();
        assert_eq!(summary.project_id, "AANobbMI");
        assert_eq!(summary.title, "Sodium");
        assert_eq!(summary.raw, raw);
    }

    #[test]
    fn version_without_files_has_no_first_file() {
        let json = r#"{ "id": "a", "version_number": "1.0" }"#;
        let version: ModVersion = serde_json::from_str(json).unwrap();
        assert!(version.first_file().is_none());
        assert!(version.game_versions.is_empty());
    }
}
