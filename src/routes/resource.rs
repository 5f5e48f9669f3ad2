//! Resource dispatch routes. The target resource comes from the query string, not the path.

use crate::handlers::resource::{
    create, delete, delete_one, index, update, update_one, upsert, upsert_one, view,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/resource",
            get(index).post(create).patch(update).delete(delete).put(upsert),
        )
        .route(
            "/resource/:id",
            get(view).patch(update_one).delete(delete_one).put(upsert_one),
        )
        .with_state(state)
}
