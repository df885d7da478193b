//! Implements the `RecordStore` trait using in-memory data.

use crate::store::RecordStore;
use crate::Result;
use anyhow::bail;
use std::collections::HashMap;

/// An implementation of `RecordStore` that never touches the disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value` under `key`.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut data = HashMap::new();
        data.insert(key.into(), value.into());
        Self {
            data,
            fail_writes: false,
        }
    }

    /// When set, every `put` fails. Used to exercise write failures.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            bail!("Writes to '{key}' are disabled in this store");
        }
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("transactions").unwrap(), None);
    }

    #[test]
    fn test_put_then_get() {
        let mut store = MemoryStore::new();
        store.put("transactions", "[]").unwrap();
        assert_eq!(store.get("transactions").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_fail_writes() {
        let mut store = MemoryStore::with_value("transactions", "[]");
        store.set_fail_writes(true);
        assert!(store.put("transactions", "[1]").is_err());
        assert_eq!(store.get("transactions").unwrap().as_deref(), Some("[]"));
    }
}
