//! Router assembly.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::config::ServerConfig;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Full application: common routes at the root, resource routes under the configured prefix,
/// request bodies capped at the configured size.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let resources = resource_routes(state);
    let api = if config.api_prefix.is_empty() {
        resources
    } else {
        Router::new().nest(&config.api_prefix, resources)
    };
    Router::new()
        .merge(common_routes())
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(config.body_limit_bytes)),
        )
}
