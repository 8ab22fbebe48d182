use log::{debug, info};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::errors::CoreError;
use crate::models::portfolio::ProfileMap;
use crate::models::settings::Settings;

use super::format;
use super::traits::ProfileStore;

/// Profile store backed by a single JSON file holding every profile.
///
/// Saves go to a temporary file in the same directory, which is flushed to
/// disk and then renamed over the target, so readers never observe a
/// truncated file. The replacement keeps the permissions of the file it
/// replaces; a new store file gets the process umask applied to `0o666`.
/// There is no file locking: concurrent writers follow last-write-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.store_path.clone())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temporary file is created in. Must be on the same
    /// filesystem as the target for the rename to be atomic.
    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Temporary file next to the target, created `0o666` minus the umask
    /// on Unix instead of tempfile's owner-only default.
    fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            Builder::new()
                .permissions(std::fs::Permissions::from_mode(0o666))
                .tempfile_in(dir)
        }
        #[cfg(not(unix))]
        {
            Builder::new().tempfile_in(dir)
        }
    }

    /// Copy the current store file's permissions onto `tmp`. Nothing to do
    /// when the store does not exist yet.
    fn keep_permissions(&self, tmp: &NamedTempFile) -> Result<(), CoreError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => tmp
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.unavailable("copy permissions of", e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.unavailable("inspect", e)),
        }
    }

    fn unavailable(&self, action: &str, e: std::io::Error) -> CoreError {
        CoreError::StoreUnavailable(format!(
            "cannot {action} {}: {e}",
            self.path.display()
        ))
    }
}

impl ProfileStore for JsonFileStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<ProfileMap, CoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("profile store {} not found, starting empty", self.path.display());
                return Ok(ProfileMap::new());
            }
            Err(e) => return Err(self.unavailable("read", e)),
        };

        let profiles = format::decode_profiles(&bytes)?;
        debug!(
            "loaded {} profile(s) from {}",
            profiles.len(),
            self.path.display()
        );
        Ok(profiles)
    }

    fn save(&mut self, profiles: &ProfileMap) -> Result<(), CoreError> {
        let bytes = format::encode_profiles(profiles)?;
        let dir = self.parent_dir();

        std::fs::create_dir_all(&dir).map_err(|e| self.unavailable("create directory for", e))?;
        let mut tmp = Self::staging_file(&dir).map_err(|e| self.unavailable("stage", e))?;
        tmp.write_all(&bytes)
            .map_err(|e| self.unavailable("write", e))?;
        self.keep_permissions(&tmp)?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| self.unavailable("sync", e))?;
        tmp.persist(&self.path)?;

        info!(
            "saved {} profile(s) to {}",
            profiles.len(),
            self.path.display()
        );
        Ok(())
    }
}
