use std::fs;
use std::path::{Path, PathBuf};

use super::{Store, StoreError};

/// One JSON file per key under a data directory (`<dir>/<key>.json`).
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Where an unreadable record is moved before anything overwrites it.
    pub fn backup_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json.bak"))
    }
}

impl Store for FileStore {
    /// A record that exists but cannot be read (permissions, invalid UTF-8)
    /// is moved to [`FileStore::backup_path_for`] and reported as absent, so
    /// the next `set` does not destroy it.
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                let backup = self.backup_path_for(key);
                match fs::rename(&path, &backup) {
                    Ok(()) => tracing::error!(
                        key,
                        error = %e,
                        backup = %backup.display(),
                        "unreadable stored value moved aside"
                    ),
                    Err(move_err) => tracing::error!(
                        key,
                        error = %e,
                        move_error = %move_err,
                        "unreadable stored value could not be moved aside and will be overwritten"
                    ),
                }
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));

        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &target).map_err(io_err)?;
        tracing::trace!(key, path = %target.display(), "stored value");
        Ok(())
    }
}
