use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

/// Minimal keyed registry behind the mock-account, travel-plan, and
/// background-task endpoints. Injected so tests can substitute a fresh
/// in-memory store and production can later swap in a real backend.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn put(&self, key: &str, value: Value);
    fn list(&self) -> Vec<Value>;
    fn len(&self) -> usize;
}

/// Insertion-ordered in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Vec<(String, Value)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn put(&self, key: &str, value: Value) {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key.to_string(), value)),
        }
    }

    fn list(&self) -> Vec<Value> {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().map(|(_, v)| v.clone()).collect()
    }

    fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Process-wide registries handed to the routing layer.
#[derive(Clone)]
pub struct AppState {
    pub plans: Arc<dyn Store>,
    pub users: Arc<dyn Store>,
    pub tasks: Arc<dyn Store>,
}

impl AppState {
    pub fn in_memory() -> Self {
        Self {
            plans: Arc::new(MemoryStore::new()),
            users: Arc::new(MemoryStore::new()),
            tasks: Arc::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_get_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("plan_1").is_none());

        store.put("plan_1", json!({"destination": "Jaipur"}));
        assert_eq!(store.get("plan_1"), Some(json!({"destination": "Jaipur"})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_replaces_existing_key() {
        let store = MemoryStore::new();
        store.put("task", json!({"status": "processing"}));
        store.put("task", json!({"status": "completed"}));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("task"), Some(json!({"status": "completed"})));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.put("a", json!(1));
        store.put("b", json!(2));
        store.put("c", json!(3));

        assert_eq!(store.list(), vec![json!(1), json!(2), json!(3)]);
    }
}
