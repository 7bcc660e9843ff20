//! Carrier business operations

use std::num::NonZeroU64;
use std::sync::Arc;

use log::info;

use crate::domain::{
    Carrier, CarrierDraft, CarrierPatch, CarrierQuery, CarrierQueryInput, CarrierRepository,
    DomainError, DomainResult, ProjectedCarrier,
};
use crate::shared::PaginatedResult;

/// Service for carrier operations
pub struct CarrierService {
    repository: Arc<dyn CarrierRepository>,
    max_page_size: NonZeroU64,
}

impl CarrierService {
    pub fn new(repository: Arc<dyn CarrierRepository>, max_page_size: NonZeroU64) -> Self {
        Self {
            repository,
            max_page_size,
        }
    }

    /// List one page of carriers.
    ///
    /// The inputs are normalized before storage is touched, so a rejected
    /// `sortBy` never reaches the repository. `request_url` is the URL the
    /// client called and seeds the `next`/`previous` links.
    pub async fn list(
        &self,
        input: CarrierQueryInput,
        request_url: &str,
    ) -> DomainResult<PaginatedResult<ProjectedCarrier>> {
        let query = CarrierQuery::normalize(input, self.max_page_size)?;
        let page = self.repository.find_page(&query).await?;

        Ok(PaginatedResult::assemble(
            page.records,
            page.total,
            query.page,
            query.page_size,
            request_url,
        ))
    }

    pub async fn get(&self, id: &str) -> DomainResult<Carrier> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::carrier_not_found(id))
    }

    pub async fn create(&self, draft: CarrierDraft) -> DomainResult<Carrier> {
        let carrier = Carrier::register(draft);
        self.repository.save(carrier.clone()).await?;
        info!("Carrier created: {} ({})", carrier.id, carrier.name);
        Ok(carrier)
    }

    pub async fn update(&self, id: &str, patch: CarrierPatch) -> DomainResult<Carrier> {
        let mut carrier = self.get(id).await?;
        carrier.apply(patch);
        self.repository.update(carrier.clone()).await?;
        info!("Carrier updated: {}", carrier.id);
        Ok(carrier)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        self.repository.delete(id).await?;
        info!("Carrier deleted: {}", id);
        Ok(())
    }

    /// Storage round-trip used by the health check
    pub async fn ping(&self) -> DomainResult<()> {
        self.repository.ping().await
    }
}
