//! Extract the resource selection and raw query parameters from the request URI.

use crate::error::AppError;
use crate::resolver::ResourceSelector;
use crate::resource::QueryParams;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

/// Normalized `resourceDir`/`resourceName` plus every query parameter, in URI order.
/// Rejects with `BadRequest` when `resourceName` is missing or empty.
#[derive(Clone, Debug)]
pub struct ResourceQuery {
    pub selector: ResourceSelector,
    pub params: QueryParams,
}

#[async_trait]
impl<S> FromRequestParts<S> for ResourceQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let params = QueryParams::new(pairs);
        let selector = ResourceSelector::from_query(&params)?;
        Ok(ResourceQuery { selector, params })
    }
}
