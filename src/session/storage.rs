//! Key-value persistence backing the session, notifications and theme
//!
//! The client only ever needs string values under a handful of fixed keys,
//! so the trait is deliberately small. `FileStore` keeps everything in one
//! JSON object on disk; `MemoryStore` is used in tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StorageError;

type Result<T> = std::result::Result<T, StorageError>;

/// String key-value persistence.
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// JSON-file store. Loaded once when opened, rewritten on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating nothing until the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)
                    .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))?
            }
        } else {
            BTreeMap::new()
        };

        log::debug!(
            "Opened storage {} with {} entries",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, contents)?;

        // Holds a bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_basic_operations() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token"), None);

        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("abc"));

        store.set("token", "def").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("def"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token"), None);

        // Removing again is fine
        store.remove("token").unwrap();
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("storage.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set("theme", "dark").unwrap();
            store.set("token", "t0k3n").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
        assert_eq!(reopened.get("token").as_deref(), Some("t0k3n"));

        reopened.remove("token").unwrap();
        let again = FileStore::open(&path).unwrap();
        assert_eq!(again.get("token"), None);
        assert_eq!(again.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("none.json")).unwrap();
        assert_eq!(store.get("anything"), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileStore::open(&path).unwrap();
        store.set("token", "secret").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
