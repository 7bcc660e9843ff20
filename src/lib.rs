//! # FreightCMS Carriers
//!
//! REST service for freight carrier records with paginated, sortable and
//! field-projected listing.
//!
//! ## Architecture
//!
//! - **domain**: carrier entity, list query normalization, repository trait
//! - **application**: carrier use cases
//! - **infrastructure**: SeaORM (SQLite) and in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: pagination links/envelope and shutdown signalling

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiDoc, RouterConfig};
