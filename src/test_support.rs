//! Test doubles shared by unit tests across the crate

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{
    Carrier, CarrierPage, CarrierQuery, CarrierRepository, DomainError, DomainResult,
};

/// Repository that returns a canned listing (or error) and counts calls
pub struct StubCarrierRepository {
    outcome: Result<CarrierPage, String>,
    carrier: Option<Carrier>,
    calls: AtomicUsize,
    last_query: Mutex<Option<CarrierQuery>>,
}

impl StubCarrierRepository {
    pub fn with_page(page: CarrierPage) -> Self {
        Self {
            outcome: Ok(page),
            carrier: None,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            ..Self::with_page(CarrierPage::default())
        }
    }

    pub fn with_carrier(mut self, carrier: Carrier) -> Self {
        self.carrier = Some(carrier);
        self
    }

    /// Total number of repository invocations
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<CarrierQuery> {
        self.last_query.lock().unwrap().clone()
    }

    fn hit(&self) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(_) => Ok(()),
            Err(message) => Err(DomainError::Storage(message.clone())),
        }
    }
}

#[async_trait]
impl CarrierRepository for StubCarrierRepository {
    async fn find_page(&self, query: &CarrierQuery) -> DomainResult<CarrierPage> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.hit()?;
        Ok(self.outcome.clone().unwrap_or_default())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Carrier>> {
        self.hit()?;
        Ok(self.carrier.clone().filter(|c| c.id == id))
    }

    async fn save(&self, _carrier: Carrier) -> DomainResult<()> {
        self.hit()
    }

    async fn update(&self, _carrier: Carrier) -> DomainResult<()> {
        self.hit()
    }

    async fn delete(&self, _id: &str) -> DomainResult<()> {
        self.hit()
    }

    async fn ping(&self) -> DomainResult<()> {
        self.hit()
    }
}
