use crate::core::PersistentStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// One file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Keys may contain characters that are not valid in file names
    /// (`@RocketShoes:cart`), so everything but `[A-Za-z0-9_-]` becomes `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", file_name))
    }
}

impl PersistentStore for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash never leaves a half-written cart.
        let tmp_path = full_path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &full_path)?;
        Ok(())
    }
}

/// In-process storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CART_STORAGE_KEY;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_local_storage_missing_key_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert_eq!(storage.read(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_local_storage_overwrites_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested"));

        storage.write(CART_STORAGE_KEY, "[]").unwrap();
        storage.write(CART_STORAGE_KEY, "[1]").unwrap();

        assert_eq!(storage.read(CART_STORAGE_KEY).unwrap().as_deref(), Some("[1]"));
        assert!(!storage.path_for(CART_STORAGE_KEY).with_extension("json.tmp").exists());
    }

    #[test]
    fn test_key_is_sanitized_into_file_name() {
        let storage = LocalStorage::new("/data");
        assert_eq!(
            storage.path_for(CART_STORAGE_KEY),
            Path::new("/data").join("_RocketShoes_cart.json")
        );
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let view = storage.clone();

        storage.write("k", "v").unwrap();

        assert_eq!(view.read("k").unwrap().as_deref(), Some("v"));
        assert_eq!(view.read("other").unwrap(), None);
    }
}
