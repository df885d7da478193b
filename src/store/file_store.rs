//! Implements the `RecordStore` trait with one JSON file per key.

use crate::store::RecordStore;
use crate::{utils, Result};
use anyhow::{ensure, Context};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Stores each key as `{dir}/{key}.json`. Writes go through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store rooted at `dir`, creating the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        utils::make_dir(&dir).context("Unable to create the record store directory")?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that backs `key`.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        ensure!(
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "Invalid record store key '{key}'"
        );
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl RecordStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        trace!("Reading '{key}' from {}", path.display());
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read file at {}", path.display())),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("Writing {} bytes to '{key}'", value.len());
        utils::write_atomic(&path, value)
    }
}
