// Local file storage primitives shared by settings, config and progress export.
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;

pub struct LocalStorage;

impl LocalStorage {
    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Reads the raw text of a file under its lock. `Ok(None)` when missing.
    pub fn read_locked(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::with_lock(path, || {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Some(text))
        })
    }

    /// Serializes `value` as pretty JSON and replaces the file atomically.
    pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        Self::with_lock(path, || {
            let json = serde_json::to_string_pretty(value)?;
            Self::atomic_write(path, json)?;
            Ok(())
        })
    }

    /// Loads a JSON document. `Ok(None)` when the file does not exist.
    pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        match Self::read_locked(path)? {
            Some(text) => {
                let value = serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Copies an unreadable file aside (`<name>.bak`) before it gets overwritten.
    pub fn backup_corrupt(path: &Path) -> Option<PathBuf> {
        let mut backup = path.as_os_str().to_os_string();
        backup.push(".bak");
        let backup = PathBuf::from(backup);
        match fs::copy(path, &backup) {
            Ok(_) => Some(backup),
            Err(e) => {
                log::warn!("Could not back up {}: {}", path.display(), e);
                None
            }
        }
    }
}
