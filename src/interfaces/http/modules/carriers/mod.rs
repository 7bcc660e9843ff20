//! Carrier module: CRUD and paginated listing of freight carriers

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
