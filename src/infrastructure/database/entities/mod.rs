//! Database entities module

pub mod carrier;

pub use carrier::Entity as Carrier;
