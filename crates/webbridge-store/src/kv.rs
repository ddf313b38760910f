//! In-memory key/value map used by the map-based bridge operations.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// One map entry. `type` names the stored value's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    pub value: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl KvEntry {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
            type_name: "string".to_string(),
        }
    }
}

/// Process-local map keyed by string. Not persisted.
#[derive(Debug, Default)]
pub struct KvStore {
    entries: Mutex<BTreeMap<String, KvEntry>>,
}

impl KvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. Returns a snapshot of the whole map.
    pub fn store(&self, key: &str, value: &str) -> StoreResult<BTreeMap<String, KvEntry>> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), KvEntry::new(value));
        Ok(entries.clone())
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<KvEntry>> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    pub fn snapshot(&self) -> StoreResult<BTreeMap<String, KvEntry>> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.clone())
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .clear();
        Ok(())
    }

    pub fn len(&self) -> StoreResult<usize> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_is_none() {
        let kv = KvStore::new();
        assert_eq!(kv.get("nope").unwrap(), None);
        assert!(kv.is_empty().unwrap());
    }

    #[test]
    fn store_then_get() {
        let kv = KvStore::new();
        kv.store("user", "alice").unwrap();

        let entry = kv.get("user").unwrap().unwrap();
        assert_eq!(entry.value, "alice");
        assert_eq!(entry.type_name, "string");
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
    }

    #[test]
    fn second_store_overwrites() {
        let kv = KvStore::new();
        kv.store("user", "alice").unwrap();
        let snapshot = kv.store("user", "bob").unwrap();

        assert_eq!(kv.len().unwrap(), 1);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(kv.get("user").unwrap().unwrap().value, "bob");
    }

    #[test]
    fn clear_removes_everything() {
        let kv = KvStore::new();
        kv.store("a", "1").unwrap();
        kv.store("b", "2").unwrap();
        kv.clear().unwrap();
        assert!(kv.is_empty().unwrap());
        assert!(kv.snapshot().unwrap().is_empty());
    }

    #[test]
    fn entry_serializes_type_field() {
        let kv = KvStore::new();
        kv.store("k", "v").unwrap();
        let json = serde_json::to_value(kv.get("k").unwrap().unwrap()).unwrap();
        assert_eq!(json["value"], "v");
        assert_eq!(json["type"], "string");
        assert!(json.get("type_name").is_none());
    }

    #[test]
    fn poisoned_lock_is_reported_by_every_accessor() {
        let kv = std::sync::Arc::new(KvStore::new());
        kv.store("user", "alice").unwrap();

        let poisoner = std::sync::Arc::clone(&kv);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("poison the map");
        })
        .join();

        assert!(matches!(kv.len(), Err(StoreError::Poisoned)));
        assert!(matches!(kv.is_empty(), Err(StoreError::Poisoned)));
        assert!(matches!(kv.get("user"), Err(StoreError::Poisoned)));
        assert!(matches!(kv.snapshot(), Err(StoreError::Poisoned)));
    }
}
