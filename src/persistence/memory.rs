//! In-memory store

use std::sync::{Mutex, MutexGuard};

use ahash::AHashMap;

use super::PersistenceCapability;
use crate::error::{Error, Result};

/// Process-local store, used by tests and as a fallback when no config dir exists
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<AHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.lock(None).map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self, key: Option<&str>) -> Result<MutexGuard<'_, AHashMap<String, String>>> {
        self.entries.lock().map_err(|_| Error::Persistence {
            key: key.unwrap_or_default().to_string(),
            message: "memory store lock poisoned".to_string(),
        })
    }
}

impl PersistenceCapability for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock(Some(key))?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock(Some(key))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock(Some(key))?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").expect("get"), None);

        store.set("k", "v1").expect("set");
        store.set("k", "v2").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k").expect("remove");
        store.remove("k").expect("remove absent");
        assert!(store.is_empty());
    }
}
