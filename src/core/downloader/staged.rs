use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::{ModError, ModResult};

/// An artifact fully written to its own staging directory.
///
/// The staging directory is removed when the handle is dropped, whether or
/// not `install` ran or succeeded.
#[derive(Debug)]
pub struct StagedArtifact {
    dir: PathBuf,
    path: PathBuf,
    file_name: String,
    version_number: String,
    bytes: u64,
}

impl StagedArtifact {
    pub(crate) fn new(dir: PathBuf, file_name: &str, version_number: &str) -> Self {
        Self {
            path: dir.join(file_name),
            dir,
            file_name: file_name.to_string(),
            version_number: version_number.to_string(),
            bytes: 0,
        }
    }

    pub(crate) fn set_bytes(&mut self, bytes: u64) {
        self.bytes = bytes;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn version_number(&self) -> &str {
        &self.version_number
    }

    /// Move this artifact into `target_dir`, replacing a same-named file.
    ///
    /// Only this artifact moves; nothing else in staging is touched.
    pub async fn install(self, target_dir: &Path) -> ModResult<PathBuf> {
        let install_err = |source: std::io::Error| ModError::Install {
            file: self.file_name.clone(),
            target: target_dir.to_path_buf(),
            source,
        };

        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(install_err)?;

        let dest = target_dir.join(&self.file_name);
        if let Err(e) = tokio::fs::rename(&self.path, &dest).await {
            // Cross-device moves cannot rename.
            debug!("Rename into {:?} failed ({}), copying instead", dest, e);
            tokio::fs::copy(&self.path, &dest)
                .await
                .map_err(install_err)?;
        }

        info!("Installed {} ({} bytes) -> {:?}", self.file_name, self.bytes, dest);
        Ok(dest)
    }
}

impl Drop for StagedArtifact {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Cannot clear staging dir {:?}: {}", self.dir, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged_with(dir: &Path, name: &str, body: &[u8]) -> StagedArtifact {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), body).unwrap();
        StagedArtifact::new(dir.to_path_buf(), name, "1.0.0")
    }

    #[tokio::test]
    async fn install_moves_file_and_clears_staging() {
        let tmp = tempfile::tempdir().unwrap();
        let stage_dir = tmp.path().join("staging").join("call");
        let mods = tmp.path().join("mods");
        let staged = staged_with(&stage_dir, "jei.jar", b"new");

        let dest = staged.install(&mods).await.unwrap();

        assert_eq!(dest, mods.join("jei.jar"));
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
        assert!(!stage_dir.exists());
    }

    #[tokio::test]
    async fn install_overwrites_same_named_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mods = tmp.path().join("mods");
        std::fs::create_dir_all(&mods).unwrap();
        std::fs::write(mods.join("jei.jar"), b"old").unwrap();
        let staged = staged_with(&tmp.path().join("s"), "jei.jar", b"new");

        staged.install(&mods).await.unwrap();

        assert_eq!(std::fs::read(mods.join("jei.jar")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn failed_install_is_install_error_and_still_cleans_up() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let stage_dir = tmp.path().join("s");
        let staged = staged_with(&stage_dir, "jei.jar", b"new");

        let err = staged.install(&blocker.join("mods")).await.unwrap_err();

        assert!(matches!(err, ModError::Install { .. }));
        assert!(!stage_dir.exists());
    }

    #[test]
    fn drop_removes_unused_staging_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let stage_dir = tmp.path().join("s");
        let staged = staged_with(&stage_dir, "a.jar", b"x");
        assert!(staged.path().exists());

        drop(staged);

        assert!(!stage_dir.exists());
    }
}
