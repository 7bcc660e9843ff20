//! HTTP REST API interfaces
//!
//! - `common`: response envelope, extractors and error mapping
//! - `modules`: handlers grouped by resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, RouterConfig};
