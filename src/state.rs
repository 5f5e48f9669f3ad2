//! Shared application state for all routes. The registry is fixed once the router is built.

use crate::registry::ResourceRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ResourceRegistry>,
}

impl AppState {
    pub fn new(registry: ResourceRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}
