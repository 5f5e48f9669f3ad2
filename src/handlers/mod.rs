//! HTTP handlers for resource dispatch.

pub mod resource;
pub use resource::*;
