use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Key under which the selected display mode is remembered.
pub const MODE_KEY: &str = "currentMode";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed preferences in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn store(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        (**self).load(key)
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).store(key, value)
    }
}

/// Preferences kept in a JSON file, rewritten on every store.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.json` in the per-user config directory.
    pub fn open_default() -> Result<Self, PreferenceError> {
        let dirs = crate::project_dirs().ok_or(PreferenceError::NoConfigDir)?;
        Ok(Self::new(dirs.config_dir().join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| PreferenceError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut all = self.read_all().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable preferences: {}", e);
            BTreeMap::new()
        });
        all.insert(key.to_owned(), value.to_owned());

        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&all).map_err(|source| PreferenceError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

/// Process-lifetime preferences, used when no config directory is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_nothing() {
        let dir = tempdir().expect("tempdir");
        let store = FilePreferenceStore::new(dir.path().join("preferences.json"));
        assert_eq!(store.load(MODE_KEY).expect("load"), None);
    }

    #[test]
    fn stored_value_survives_a_new_store_instance() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("preferences.json");

        let mut store = FilePreferenceStore::new(&path);
        store.store(MODE_KEY, "5pm").expect("store");
        store.store(MODE_KEY, "6pm").expect("store again");

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(reopened.load(MODE_KEY).expect("load"), Some("6pm".to_owned()));
    }

    #[test]
    fn malformed_file_is_an_error_on_load_but_replaced_on_store() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").expect("write");

        let mut store = FilePreferenceStore::new(&path);
        assert!(matches!(store.load(MODE_KEY), Err(PreferenceError::Json { .. })));

        store.store(MODE_KEY, "now").expect("store");
        assert_eq!(store.load(MODE_KEY).expect("load"), Some("now".to_owned()));
    }

    #[test]
    fn unwritable_location_reports_io_error() {
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").expect("write");

        let mut store = FilePreferenceStore::new(blocker.join("preferences.json"));
        assert!(matches!(
            store.store(MODE_KEY, "5pm"),
            Err(PreferenceError::Io { .. })
        ));
    }
}
