use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::links::paginated_link;

/// Listing response envelope
///
/// `next` and `previous` are always present and hold an empty string when
/// there is no adjacent page to point to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    /// Count of all stored records
    pub total: u64,
    /// Zero-indexed page
    pub page: u64,
    pub page_size: u64,
    /// `total / pageSize`, rounded down
    pub pages: u64,
    /// Link to `page + 1`, set when this page came back full
    pub next: String,
    /// Link to `page - 1`, set when `page > 0`
    pub previous: String,
    pub entities: Vec<T>,
}

impl<T> PaginatedResult<T> {
    /// Build the envelope for one page. `request_url` is the URL the client
    /// called; links are derived from it.
    pub fn assemble(
        entities: Vec<T>,
        total: u64,
        page: u64,
        page_size: NonZeroU64,
        request_url: &str,
    ) -> Self {
        let size = page_size.get();

        let next = if entities.len() as u64 >= size {
            paginated_link(request_url, page.saturating_add(1), size)
        } else {
            String::new()
        };

        let previous = if page > 0 {
            paginated_link(request_url, page - 1, size)
        } else {
            String::new()
        };

        Self {
            total,
            page,
            page_size: size,
            pages: total / size,
            next,
            previous,
            entities,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            pages: self.pages,
            next: self.next,
            previous: self.previous,
            entities: self.entities.into_iter().map(f).collect(),
        }
    }
}
