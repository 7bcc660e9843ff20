//! Adjacent-page link rewriting
//!
//! Links are produced by substituting the `page` and `pageSize` values in the
//! URL the client actually requested, so any other query parameters and their
//! order come back untouched. Parameters missing from the request are not
//! added.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

static PAGE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"page=-?[0-9]+").expect("valid page pattern"));

static PAGE_SIZE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pageSize=-?[0-9]+").expect("valid pageSize pattern"));

/// Rewrite the first `page=` and `pageSize=` occurrences of `url`.
pub fn paginated_link(url: &str, page: u64, page_size: u64) -> String {
    let url = PAGE_PARAM.replace(url, NoExpand(&format!("page={page}")));
    let url = PAGE_SIZE_PARAM.replace(&url, NoExpand(&format!("pageSize={page_size}")));
    url.into_owned()
}
