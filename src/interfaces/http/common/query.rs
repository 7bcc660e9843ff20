//! Query-string extractor with JSON rejections

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::ApiError;

/// Like `axum::extract::Query<T>`, but a malformed query string (for example
/// a non-numeric `page`) is answered with a 400 `ApiResponse` body.
pub struct BindQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for BindQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Binding(rejection.body_text()))?;
        Ok(BindQuery(value))
    }
}
