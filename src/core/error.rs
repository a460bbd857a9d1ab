use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the whole client.
/// Every module returns `Result<T, ModError>`.
#[derive(Debug, Error)]
pub enum ModError {
    // ── Resolution ──────────────────────────────────────
    #[error("No project found for '{0}'")]
    NotFound(String),

    #[error("No version of '{project}' matches '{query}'")]
    NoCompatibleVersion { project: String, query: String },

    #[error("Unknown loader: {0}")]
    UnknownLoader(String),

    #[error("Version {0} has no downloadable files")]
    NoArtifact(String),

    // ── Network ─────────────────────────────────────────
    #[error("Registry request to {url} failed: {reason}")]
    Upstream { url: String, reason: String },

    #[error("Transfer of {url} failed: {reason}")]
    Transfer { url: String, reason: String },

    // ── Filesystem ──────────────────────────────────────
    #[error("Cannot install {file} into {target:?}: {source}")]
    Install {
        file: String,
        target: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Manifest ────────────────────────────────────────
    #[error("Manifest at {path:?} is corrupt: {source}")]
    CorruptManifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type ModResult<T> = Result<T, ModError>;

/// Payload-free tag for branching on an error without matching its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NoCompatibleVersion,
    Upstream,
    Transfer,
    Install,
    CorruptManifest,
    Other,
}

impl ModError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModError::NotFound(_) => ErrorKind::NotFound,
            ModError::NoCompatibleVersion { .. } => ErrorKind::NoCompatibleVersion,
            ModError::Upstream { .. } => ErrorKind::Upstream,
            ModError::Transfer { .. } => ErrorKind::Transfer,
            ModError::Install { .. } => ErrorKind::Install,
            ModError::CorruptManifest { .. } => ErrorKind::CorruptManifest,
            ModError::UnknownLoader(_)
            | ModError::NoArtifact(_)
            | ModError::Io { .. }
            | ModError::Json(_)
            | ModError::Other(_) => ErrorKind::Other,
        }
    }

    pub(crate) fn upstream(url: &str, reason: impl ToString) -> Self {
        ModError::Upstream {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn transfer(url: &str, reason: impl ToString) -> Self {
        ModError::Transfer {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<std::io::Error> for ModError {
    fn from(source: std::io::Error) -> Self {
        ModError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
