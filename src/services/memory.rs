use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::{Address, NewAddress};
use crate::services::store::{AddressStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    addresses: BTreeMap<i64, Address>,
}

/// In-process address store
///
/// Ids start at 1 and are never reused. Used for local runs and the HTTP tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.addresses.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl AddressStore for MemoryStore {
    async fn create(&self, address: &NewAddress) -> Result<Address, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let record = Address {
            id: inner.next_id,
            name: address.name.clone(),
            location: address.location(),
            created_at: Some(chrono::Utc::now()),
            updated_at: None,
        };
        inner.addresses.insert(record.id, record.clone());

        Ok(record)
    }

    async fn get(&self, id: i64) -> Result<Option<Address>, StoreError> {
        Ok(self.inner.read().await.addresses.get(&id).cloned())
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Address>, StoreError> {
        let inner = self.inner.read().await;

        Ok(inner
            .addresses
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<Address>, StoreError> {
        Ok(self.inner.read().await.addresses.values().cloned().collect())
    }

    async fn update(&self, id: i64, address: &NewAddress) -> Result<Option<Address>, StoreError> {
        let mut inner = self.inner.write().await;

        Ok(inner.addresses.get_mut(&id).map(|record| {
            record.name = address.name.clone();
            record.location = address.location();
            record.updated_at = Some(chrono::Utc::now());
            record.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Address>, StoreError> {
        Ok(self.inner.write().await.addresses.remove(&id))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
