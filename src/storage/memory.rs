//! In-memory key/value store

use std::cell::RefCell;
use std::collections::HashMap;

use super::{KeyValueStore, StorageResult};

/// Process-local store. Values vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set_item("citycare_theme", "ocean").unwrap();
        assert_eq!(
            store.get_item("citycare_theme").unwrap().as_deref(),
            Some("ocean")
        );

        store.set_item("citycare_theme", "sunrise").unwrap();
        assert_eq!(store.len(), 1);

        store.remove_item("citycare_theme").unwrap();
        assert!(store.get_item("citycare_theme").unwrap().is_none());
    }
}
