pub mod disk;
pub mod memory;

use crate::core::error::ConverterError;
use crate::core::history::{ConversionRecord, HISTORY_LIMIT, Preferences};
use crate::core::rates::Conversion;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

pub use disk::FjallStore;
pub use memory::MemoryStore;

/// Persisted key for the conversion history list (newest first, max 10).
pub const HISTORY_KEY: &str = "conversionHistory";
/// Persisted key for the singleton preference record.
pub const PREFERENCES_KEY: &str = "converterPreferences";

/// Raw byte-level key-value storage. Implementations: [`FjallStore`] for
/// durable on-disk data, [`MemoryStore`] for tests.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Owns the JSON layout and domain rules for history and preferences on top
/// of an injectable key-value backend.
pub struct PersistenceStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistenceStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Opens a durable store rooted at `path`.
    pub fn open(path: &std::path::Path) -> Result<Self> {
        Ok(Self::new(Arc::new(FjallStore::open(path)?)))
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConverterError> {
        let bytes = self
            .backend
            .get(key)
            .await
            .map_err(|e| ConverterError::Storage(e.to_string()))?;

        match bytes {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|_| ConverterError::CorruptState(key.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConverterError> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| ConverterError::Storage(e.to_string()))?;
        self.backend
            .put(key, bytes)
            .await
            .map_err(|e| ConverterError::Storage(e.to_string()))
    }

    /// Stamps the conversion with the current time, prepends it to history,
    /// truncates to the most recent [`HISTORY_LIMIT`] entries and persists
    /// the whole list. Corrupt existing history is overwritten.
    pub async fn save_to_history(
        &self,
        conversion: Conversion,
    ) -> Result<ConversionRecord, ConverterError> {
        let mut history = match self.get_history().await {
            Ok(history) => history,
            Err(ConverterError::CorruptState(key)) => {
                warn!("Discarding corrupt history under '{key}'");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let record = ConversionRecord {
            conversion,
            timestamp: Utc::now(),
        };

        history.insert(0, record.clone());
        history.truncate(HISTORY_LIMIT);

        self.put_json(HISTORY_KEY, &history).await?;
        Ok(record)
    }

    /// Returns persisted history, newest first. Absent history is empty;
    /// unparsable history is a [`ConverterError::CorruptState`].
    pub async fn get_history(&self) -> Result<Vec<ConversionRecord>, ConverterError> {
        Ok(self.get_json(HISTORY_KEY).await?.unwrap_or_default())
    }

    pub async fn clear_history(&self) -> Result<(), ConverterError> {
        self.backend
            .remove(HISTORY_KEY)
            .await
            .map_err(|e| ConverterError::Storage(e.to_string()))
    }

    /// Overwrites the preference pair wholesale.
    pub async fn save_preferences(&self, prefs: &Preferences) -> Result<(), ConverterError> {
        self.put_json(PREFERENCES_KEY, prefs).await
    }

    /// Returns saved preferences, or the {USD, EUR} default when none exist.
    pub async fn get_preferences(&self) -> Result<Preferences, ConverterError> {
        Ok(self.get_json(PREFERENCES_KEY).await?.unwrap_or_default())
    }
}
