use crate::store::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

/// Durable key-value store backed by a fjall partition. Writes are synced
/// before returning since the process usually exits right after a command.
pub struct FjallStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl FjallStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let keyspace = fjall::Config::new(path).open()?;
        let partition = keyspace.open_partition("converter", PartitionCreateOptions::default())?;

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl KeyValueStore for FjallStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.partition.get(key)?;
        debug!("Store GET for key: {key}, found: {}", value.is_some());
        Ok(value.map(|slice| slice.to_vec()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        debug!("Store PUT for key: {key}");
        self.partition.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        debug!("Store REMOVE for key: {key}");
        self.partition.remove(key)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}
