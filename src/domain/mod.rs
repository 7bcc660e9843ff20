pub mod carrier;
pub mod error;

// Re-export commonly used types
pub use carrier::{
    Address, AddressType, Carrier, CarrierDraft, CarrierField, CarrierPage, CarrierPatch,
    CarrierQuery, CarrierQueryInput, CarrierRepository, CarrierSortField, CarrierStatus,
    IdentificationCode, IdentificationCodeType, Insurance, ProjectedCarrier,
};
pub use error::{DomainError, DomainResult};
