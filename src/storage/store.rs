//! Directory-backed JSON key-value store.
//!
//! Each key is kept in its own `<key>.json` file. Writes go to a temporary
//! file first and are renamed into place.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{TrackerError, TrackerResult};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Key-value storage of JSON documents in a directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Opens the store in `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> TrackerResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads the value stored under `key`, or `None` if the key is absent.
    ///
    /// A file that is not valid JSON yields [`TrackerError::Storage`].
    pub fn get(&self, key: &str) -> TrackerResult<Option<Value>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&data).map_err(|err| TrackerError::Storage {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        Ok(Some(value))
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &Value) -> TrackerResult<()> {
        let json = serde_json::to_string_pretty(value).map_err(|err| TrackerError::Storage {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        let path = self.path(key);
        let tmp = path.with_extension(format!("{}.{}", FILE_EXTENSION, TMP_SUFFIX));
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, "Saved value");
        Ok(())
    }

    /// Removes `key`. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> TrackerResult<()> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(path)?;
            tracing::debug!(key, "Removed value");
        }
        Ok(())
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, FILE_EXTENSION))
    }
}

fn write_atomic(path: &Path, data: &str) -> TrackerResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
