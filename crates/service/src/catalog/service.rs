use std::sync::Arc;

use tracing::{info, instrument};

use models::{NewService, ServicePatch, ServiceRecord};

use crate::catalog::repository::ServiceRepository;
use crate::dashboard::{summarize, DashboardSummary};
use crate::errors::ServiceError;
use crate::query::{query, FilterSpec, SortSpec};

/// Application service over a [`ServiceRepository`]: input validation,
/// logging of mutations, and the list/dashboard read models.
#[derive(Clone)]
pub struct ServiceCatalog {
    repo: Arc<dyn ServiceRepository>,
}

impl ServiceCatalog {
    pub fn new(repo: Arc<dyn ServiceRepository>) -> Self { Self { repo } }

    /// Every record in store order.
    pub async fn all(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        self.repo.get_all().await
    }

    /// Fetch everything, then filter and sort.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::{InMemoryServiceRepository, ServiceCatalog, latency::Latency};
    /// use service::query::{FilterSpec, SortKey, SortSpec};
    /// let catalog = ServiceCatalog::new(Arc::new(InMemoryServiceRepository::seeded(Latency::none())));
    /// let filter = FilterSpec { category: Some("Design".into()), status: Some("active".into()), search: None };
    /// let rows = tokio_test::block_on(catalog.list(&filter, &SortSpec::ascending(SortKey::Name))).unwrap();
    /// assert_eq!(rows.len(), 1);
    /// assert_eq!(rows[0].name, "Logo Design");
    /// ```
    pub async fn list(&self, filter: &FilterSpec, sort: &SortSpec) -> Result<Vec<ServiceRecord>, ServiceError> {
        let records = self.repo.get_all().await?;
        Ok(query(&records, filter, sort))
    }

    pub async fn get(&self, id: u64) -> Result<ServiceRecord, ServiceError> {
        self.repo.get_by_id(id).await
    }

    /// Validate and store a new record.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::{Category, NewService};
    /// use service::{InMemoryServiceRepository, ServiceCatalog, latency::Latency};
    /// let catalog = ServiceCatalog::new(Arc::new(InMemoryServiceRepository::new(Latency::none())));
    /// let created = tokio_test::block_on(catalog.create(NewService::new("Helpdesk", Category::Support))).unwrap();
    /// assert_eq!(created.id, 1);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name, category = %input.category))]
    pub async fn create(&self, input: NewService) -> Result<ServiceRecord, ServiceError> {
        input.validate()?;
        let created = self.repo.create(input).await?;
        info!(id = created.id, status = %created.status, "service_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: u64, patch: ServicePatch) -> Result<ServiceRecord, ServiceError> {
        patch.validate()?;
        let updated = self.repo.update(id, patch).await?;
        info!(id = updated.id, status = %updated.status, "service_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<ServiceRecord, ServiceError> {
        let removed = self.repo.delete(id).await?;
        info!(id = removed.id, name = %removed.name, "service_deleted");
        Ok(removed)
    }

    pub async fn summary(&self, recent_limit: usize) -> Result<DashboardSummary, ServiceError> {
        let records = self.repo.get_all().await?;
        Ok(summarize(&records, recent_limit))
    }
}
