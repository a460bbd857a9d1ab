use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ModError;

/// Mod loaders the registry tags versions with, strongly typed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LoaderType {
    Forge,
    Fabric,
    NeoForge,
    Quilt,
}

impl LoaderType {
    /// Tag used by the registry in a version's `loaders` list.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoaderType::Forge => "forge",
            LoaderType::Fabric => "fabric",
            LoaderType::NeoForge => "neoforge",
            LoaderType::Quilt => "quilt",
        }
    }
}

impl std::fmt::Display for LoaderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoaderType {
    type Err = ModError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forge" => Ok(LoaderType::Forge),
            "fabric" => Ok(LoaderType::Fabric),
            "neoforge" => Ok(LoaderType::NeoForge),
            "quilt" => Ok(LoaderType::Quilt),
            other => Err(ModError::UnknownLoader(other.to_string())),
        }
    }
}
