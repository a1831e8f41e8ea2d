//! File-backed store.
//!
//! Keeps the whole map in memory and rewrites it as a single JSON object on
//! every mutation. Writes go to a sibling temp file that is then renamed over
//! the target, so a crash never leaves a half-written store behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, StoredItems};

// == File Store ==
/// Durable store persisted to one JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: Mutex<StoredItems>,
    quota: Option<u64>,
}

impl FileStore {
    // == Open ==
    /// Opens the store at `path`, loading existing contents if the file exists.
    ///
    /// # Arguments
    /// * `path` - File holding the persisted map
    /// * `quota` - Optional byte limit over keys plus values
    pub fn open(path: impl AsRef<Path>, quota: Option<u64>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str::<BTreeMap<String, String>>(&text).map_err(|e| {
                CacheError::CorruptEntry {
                    key: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!("Opened file store {} with {} items", path.display(), items.len());

        Ok(Self {
            path,
            items: Mutex::new(StoredItems::from_map(items)),
            quota,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &StoredItems) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let text = serde_json::to_string(items.as_map())?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock();
        let previous = items.insert(key, value, self.quota)?;

        if let Err(e) = self.persist(&items) {
            // Memory must keep matching what is on disk
            match previous {
                Some(old) => {
                    items.insert(key, &old, None)?;
                }
                None => {
                    items.remove(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock();
        let Some(old) = items.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&items) {
            items.insert(key, &old, None)?;
            return Err(e);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.lock().keys())
    }
}
