//! String key-value storage for client-side state.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{InsightError, InsightResult};

/// A string-to-string store with local-storage semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> InsightResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> InsightResult<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> InsightResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> InsightResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Persists all keys as one JSON object file. The file is re-read on every
/// access so separate processes see each other's writes. Writes go to a
/// sibling temp file that replaces the store in one rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> InsightResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(InsightError::Storage(format!(
                "Failed to read '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> InsightResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> InsightResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        let raw = serde_json::to_string_pretty(&entries)?;
        let storage_err = |e: std::io::Error| {
            InsightError::Storage(format!("Failed to write '{}': {}", self.path.display(), e))
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(storage_err)?;
        tmp.write_all(raw.as_bytes()).map_err(storage_err)?;
        tmp.as_file().sync_all().map_err(storage_err)?;
        tmp.persist(&self.path).map_err(|e| storage_err(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::default();
        store.set("k", "1".into()).unwrap();
        store.set("k", "2".into()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::new(&path);
        store.set("theme", "dark".into()).unwrap();
        store.set("playgroundGoal", "{}".into()).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("playgroundGoal").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn file_store_replaces_the_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::new(&path);
        store.set("theme", "dark".into()).unwrap();
        store.set("theme", "light".into()).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("state.json")]);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("k"), Err(InsightError::Serialization(_))));
    }
}
