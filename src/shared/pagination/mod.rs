//! Page metadata and adjacent-page links for listing responses

pub mod links;
pub mod result;

pub use links::paginated_link;
pub use result::PaginatedResult;
