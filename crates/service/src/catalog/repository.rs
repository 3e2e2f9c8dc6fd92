use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use models::{NewService, ServicePatch, ServiceRecord};

use crate::errors::ServiceError;
use crate::latency::Latency;

/// Data-access abstraction for service records.
///
/// Callers only see this trait, so the in-memory store can be swapped for a
/// database-backed one without touching the catalog or the HTTP layer.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Full scan in store order.
    async fn get_all(&self) -> Result<Vec<ServiceRecord>, ServiceError>;
    async fn get_by_id(&self, id: u64) -> Result<ServiceRecord, ServiceError>;
    /// Assigns a fresh id and the creation timestamp.
    async fn create(&self, input: NewService) -> Result<ServiceRecord, ServiceError>;
    /// Replaces only the supplied fields; id and `created_at` are preserved.
    async fn update(&self, id: u64, patch: ServicePatch) -> Result<ServiceRecord, ServiceError>;
    /// Removes the record and hands it back.
    async fn delete(&self, id: u64) -> Result<ServiceRecord, ServiceError>;
}

struct Records {
    items: Vec<ServiceRecord>,
    // never reused, even after deletes
    next_id: u64,
}

/// Ordered in-memory record store that sleeps for a simulated latency before
/// every operation.
pub struct InMemoryServiceRepository {
    inner: RwLock<Records>,
    latency: Latency,
}

impl InMemoryServiceRepository {
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    pub fn with_records(items: Vec<ServiceRecord>, latency: Latency) -> Self {
        let next_id = items.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self { inner: RwLock::new(Records { items, next_id }), latency }
    }

    /// Store pre-filled with the five demo records.
    pub fn seeded(latency: Latency) -> Self {
        Self::with_records(models::sample::sample_services(), latency)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn get_all(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        self.latency.simulate().await;
        let records = self.inner.read().await;
        Ok(records.items.clone())
    }

    async fn get_by_id(&self, id: u64) -> Result<ServiceRecord, ServiceError> {
        self.latency.simulate().await;
        let records = self.inner.read().await;
        records
            .items
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("service", id))
    }

    async fn create(&self, input: NewService) -> Result<ServiceRecord, ServiceError> {
        self.latency.simulate().await;
        let mut records = self.inner.write().await;
        let id = records.next_id;
        records.next_id += 1;
        let record = ServiceRecord::from_new(id, input, Utc::now());
        records.items.push(record.clone());
        debug!(id, total = records.items.len(), "service record appended");
        Ok(record)
    }

    async fn update(&self, id: u64, patch: ServicePatch) -> Result<ServiceRecord, ServiceError> {
        self.latency.simulate().await;
        let mut records = self.inner.write().await;
        let existing = records
            .items
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found("service", id))?;
        patch.apply(existing);
        Ok(existing.clone())
    }

    async fn delete(&self, id: u64) -> Result<ServiceRecord, ServiceError> {
        self.latency.simulate().await;
        let mut records = self.inner.write().await;
        let index = records
            .items
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found("service", id))?;
        Ok(records.items.remove(index))
    }
}
