//! Carrier repository interface

use async_trait::async_trait;

use super::model::{Carrier, ProjectedCarrier};
use super::query::CarrierQuery;
use crate::domain::DomainResult;

/// One page of projected carriers plus the count of all stored carriers
#[derive(Debug, Clone, Default)]
pub struct CarrierPage {
    pub records: Vec<ProjectedCarrier>,
    pub total: u64,
}

#[async_trait]
pub trait CarrierRepository: Send + Sync {
    /// Sorted, projected, bounded listing.
    async fn find_page(&self, query: &CarrierQuery) -> DomainResult<CarrierPage>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Carrier>>;
    async fn save(&self, carrier: Carrier) -> DomainResult<()>;
    /// Replace a stored carrier; `NotFound` when the id is unknown.
    async fn update(&self, carrier: Carrier) -> DomainResult<()>;
    /// Remove a carrier. Unknown ids are not an error.
    async fn delete(&self, id: &str) -> DomainResult<()>;
    /// Round-trip to the backing store, used by the health check.
    async fn ping(&self) -> DomainResult<()>;
}
