//! Resource handlers: one per verb, all funnelled through the dispatcher.

use crate::error::AppError;
use crate::extractors::ResourceQuery;
use crate::service::{Action, ResourceDispatcher, ResourceRequest};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
};

async fn run(
    state: &AppState,
    action: Action,
    query: ResourceQuery,
    id: Option<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request = ResourceRequest {
        selector: query.selector,
        id,
        query: query.params,
        body,
    };
    ResourceDispatcher::dispatch(&state.registry, action, request).await
}

/// GET /resource
pub async fn index(State(state): State<AppState>, query: ResourceQuery, body: Bytes) -> Result<Response, AppError> {
    run(&state, Action::Index, query, None, body).await
}

/// GET /resource/:id
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: ResourceQuery,
    body: Bytes,
) -> Result<Response, AppError> {
    run(&state, Action::View, query, Some(id), body).await
}

/// POST /resource
pub async fn create(State(state): State<AppState>, query: ResourceQuery, body: Bytes) -> Result<Response, AppError> {
    run(&state, Action::Create, query, None, body).await
}

/// PATCH /resource
pub async fn update(State(state): State<AppState>, query: ResourceQuery, body: Bytes) -> Result<Response, AppError> {
    run(&state, Action::Update, query, None, body).await
}

/// PATCH /resource/:id
pub async fn update_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: ResourceQuery,
    body: Bytes,
) -> Result<Response, AppError> {
    run(&state, Action::Update, query, Some(id), body).await
}

/// DELETE /resource
pub async fn delete(State(state): State<AppState>, query: ResourceQuery, body: Bytes) -> Result<Response, AppError> {
    run(&state, Action::Delete, query, None, body).await
}

/// DELETE /resource/:id
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: ResourceQuery,
    body: Bytes,
) -> Result<Response, AppError> {
    run(&state, Action::Delete, query, Some(id), body).await
}

/// PUT /resource
pub async fn upsert(State(state): State<AppState>, query: ResourceQuery, body: Bytes) -> Result<Response, AppError> {
    run(&state, Action::Upsert, query, None, body).await
}

/// PUT /resource/:id
pub async fn upsert_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: ResourceQuery,
    body: Bytes,
) -> Result<Response, AppError> {
    run(&state, Action::Upsert, query, Some(id), body).await
}
