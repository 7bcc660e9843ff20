//! Database repository implementations

pub mod carrier_repository;

pub use carrier_repository::SeaOrmCarrierRepository;
