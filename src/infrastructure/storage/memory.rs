//! In-memory carrier repository

use std::cmp::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    Carrier, CarrierPage, CarrierQuery, CarrierRepository, CarrierSortField, DomainError,
    DomainResult,
};

/// In-memory storage for development and testing
pub struct InMemoryCarrierRepository {
    carriers: DashMap<String, Carrier>,
}

impl InMemoryCarrierRepository {
    pub fn new() -> Self {
        Self {
            carriers: DashMap::new(),
        }
    }
}

impl Default for InMemoryCarrierRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(sort_by: CarrierSortField, a: &Carrier, b: &Carrier) -> Ordering {
    match sort_by {
        CarrierSortField::Id => a.id.cmp(&b.id),
        CarrierSortField::Name => a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)),
    }
}

#[async_trait]
impl CarrierRepository for InMemoryCarrierRepository {
    async fn find_page(&self, query: &CarrierQuery) -> DomainResult<CarrierPage> {
        let mut all: Vec<Carrier> = self.carriers.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| compare(query.sort_by, a, b));

        let total = all.len() as u64;
        let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(query.page_size.get()).unwrap_or(usize::MAX);

        let records = all
            .iter()
            .skip(skip)
            .take(take)
            .map(|c| c.project(&query.fields))
            .collect();

        Ok(CarrierPage { records, total })
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Carrier>> {
        Ok(self.carriers.get(id).map(|c| c.clone()))
    }

    async fn save(&self, carrier: Carrier) -> DomainResult<()> {
        if self.carriers.contains_key(&carrier.id) {
            return Err(DomainError::Validation(format!(
                "Carrier {} already exists",
                carrier.id
            )));
        }
        self.carriers.insert(carrier.id.clone(), carrier);
        Ok(())
    }

    async fn update(&self, carrier: Carrier) -> DomainResult<()> {
        match self.carriers.get_mut(&carrier.id) {
            Some(mut existing) => {
                *existing = carrier;
                Ok(())
            }
            None => Err(DomainError::carrier_not_found(carrier.id)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.carriers.remove(id);
        Ok(())
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}
