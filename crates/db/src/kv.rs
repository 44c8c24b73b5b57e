//! String key-value storage behind the booking, cancellation and session stores.
//!
//! Values are JSON documents. Two backends are provided: [`MemoryStore`] for
//! tests and throwaway sessions, and [`FileStore`], which keeps one file per
//! key so data survives a restart.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use eyre::{Result, WrapErr, eyre};
use tempfile::NamedTempFile;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| eyre!("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| eyre!("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .wrap_err_with(|| format!("Failed to create data directory {}", dir.display()))?;
        tracing::debug!("Opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(eyre!("Invalid storage key: {key:?}"));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).wrap_err_with(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Writes to a temporary file in the same directory and renames it over
    /// the old value. On any failure the temporary file is removed and the old
    /// value is left as it was.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        let mut file = NamedTempFile::new_in(&self.dir)
            .wrap_err_with(|| format!("Failed to create a temporary file in {}", self.dir.display()))?;
        file.write_all(value.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .wrap_err_with(|| format!("Failed to write {}", file.path().display()))?;
        file.persist(&path)
            .map_err(|e| e.error)
            .wrap_err_with(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

/// Reads and decodes a JSON value, treating a missing key or JSON `null` as `None`.
pub fn get_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>>
where
    T: serde::de::DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str::<Option<T>>(&raw)
            .wrap_err_with(|| format!("Corrupt value stored under {key}")),
        None => Ok(None),
    }
}

pub fn set_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: serde::Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)
        .wrap_err_with(|| format!("Failed to encode value for {key}"))?;
    store.set(key, &raw)
}
