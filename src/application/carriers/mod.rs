//! Carrier use cases

pub mod service;

pub use service::CarrierService;
