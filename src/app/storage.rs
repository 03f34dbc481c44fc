// SPDX-License-Identifier: MPL-2.0
//! Local key-value storage for persisted preferences.
//!
//! [`KeyValueStore`] is the seam preferences are written through. The
//! [`MemoryStore`] keeps entries for the lifetime of the value, so a reload
//! is simulated by handing the same store back through
//! [`PreferenceState::into_store`](super::preferences::PreferenceState::into_store);
//! the [`FileStore`] keeps them in a CBOR file in the data directory so they
//! survive across runs.
//!
//! # Path Resolution
//!
//! 1. `base_dir` argument of [`FileStore::open_in`] (if `Some`)
//! 2. `--data-dir` CLI argument / `VITRINE_DATA_DIR` environment variable
//! 3. Platform-specific data directory

use super::paths;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Store file name within the app data directory.
const STORE_FILE: &str = "storage.cbor";

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a CBOR file, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store in the default data directory.
    ///
    /// Returns the store and an optional warning. An unreadable or corrupt
    /// file yields an empty store plus a warning; it is replaced on the next
    /// write.
    pub fn open() -> (Self, Option<String>) {
        Self::open_in(None)
    }

    /// Opens the store in a custom directory.
    pub fn open_in(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let path = paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STORE_FILE);
            path
        });

        let Some(file_path) = path.as_deref() else {
            return (
                Self::empty(None),
                Some("no data directory; preferences will not persist".to_string()),
            );
        };

        if !file_path.exists() {
            return (Self::empty(path), None);
        }

        match read_entries(file_path) {
            Ok(entries) => (Self { path, entries }, None),
            Err(err) => {
                let warning = format!("ignoring {}: {}", file_path.display(), err);
                (Self::empty(path), Some(warning))
            }
        }
    }

    fn empty(path: Option<PathBuf>) -> Self {
        Self {
            path,
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(fs::File::create(path)?);
        ciborium::into_writer(&self.entries, writer).map_err(|err| Error::Io(err.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    let reader = BufReader::new(fs::File::open(path)?);
    ciborium::from_reader(reader).map_err(|err| Error::Io(err.to_string()))
}
