use crate::store::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory key-value store backed by a HashMap. Used in tests and for
/// runs where no data directory is available.
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let store = self.inner.lock().await;
        let value = store.get(key).cloned();
        debug!("Store GET for key: {key}, found: {}", value.is_some());
        Ok(value)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut store = self.inner.lock().await;
        debug!("Store PUT for key: {key}");
        store.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut store = self.inner.lock().await;
        debug!("Store REMOVE for key: {key}");
        store.remove(key);
        Ok(())
    }
}
