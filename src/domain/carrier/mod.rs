//! Carrier aggregate
//!
//! Contains the freight carrier entity, its nested documents, the listing
//! query descriptor and the repository interface.

pub mod model;
pub mod query;
pub mod repository;

pub use model::{
    Address, AddressType, Carrier, CarrierDraft, CarrierPatch, CarrierStatus, IdentificationCode,
    IdentificationCodeType, Insurance, ProjectedCarrier,
};
pub use query::{CarrierField, CarrierQuery, CarrierQueryInput, CarrierSortField};
pub use repository::{CarrierPage, CarrierRepository};
