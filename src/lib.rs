//! Resource dispatch: a single REST endpoint whose target handler is picked from the query string.

pub mod case;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod registry;
pub mod resolver;
pub mod resource;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use async_trait::async_trait;
pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use registry::{FillerRegistry, RegisteredResource, ResourceRegistry};
pub use resolver::{ResourceSelector, RESOURCE_DIR_PARAM, RESOURCE_NAME_PARAM};
pub use resource::{
    AcceptsInput, InputData, InputFiller, QueryParams, RequestSource, ResourceContext, ResourceOutcome, ResourceResult,
    RestResource,
};
pub use response::send_result;
pub use routes::{app, common_routes, resource_routes};
pub use service::{Action, InputBinder, ResourceDispatcher, ResourceRequest};
pub use state::AppState;
