// ── Durable session storage ──
//
// A tiny string key/value store that survives process restarts. The
// session layer only ever writes two keys into it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CoreError;

/// Key/value persistence used by [`IdentitySession`](super::IdentitySession).
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

// ── MemoryStorage ───────────────────────────────────────────────────

/// Process-local storage; forgets everything on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ── FileStorage ─────────────────────────────────────────────────────

/// Storage backed by a single JSON object file.
///
/// The file is read on every access and rewritten on every change, so
/// two processes sharing it see each other's last write. A missing file
/// reads as empty; parent directories are created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), keys = entries.len(), "session storage written");
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        // An unreadable file is replaced rather than blocking a fresh login.
        let mut entries = self.load().unwrap_or_default();
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        let (mut entries, corrupt) = match self.load() {
            Ok(entries) => (entries, false),
            // Unparseable content goes away together with the key.
            Err(CoreError::Storage { .. }) if self.path.exists() => (BTreeMap::new(), true),
            Err(e) => return Err(e),
        };
        if entries.remove(key).is_some() || corrupt {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let mut s = MemoryStorage::new();
        assert_eq!(s.get("k").unwrap(), None);
        s.set("k", "v").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("v"));
        s.remove("k").unwrap();
        assert_eq!(s.get("k").unwrap(), None);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut first = FileStorage::new(&path);
        assert_eq!(first.get("user").unwrap(), None);
        first.set("user", "{\"a\":1}").unwrap();
        first.set("time", "2024-05-14T15:00:00Z").unwrap();

        let second = FileStorage::new(&path);
        assert_eq!(second.get("user").unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(
            second.get("time").unwrap().as_deref(),
            Some("2024-05-14T15:00:00Z")
        );
    }

    #[test]
    fn file_storage_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = FileStorage::new(dir.path().join("s.json"));
        s.set("a", "1").unwrap();
        s.set("b", "2").unwrap();
        s.remove("a").unwrap();
        assert_eq!(s.get("a").unwrap(), None);
        assert_eq!(s.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn garbage_file_is_an_error_on_read_and_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, "not json").unwrap();

        let mut s = FileStorage::new(&path);
        assert!(matches!(s.get("a"), Err(CoreError::Storage { .. })));

        s.set("a", "1").unwrap();
        assert_eq!(s.get("a").unwrap().as_deref(), Some("1"));
    }
}
