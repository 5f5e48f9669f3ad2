//! Resource dispatch: bind input, call the handler method for the verb, translate the result.

mod binder;
mod dispatch;
mod fields;
pub use binder::{decode_body, input_field_names, InputBinder};
pub use dispatch::{Action, ResourceDispatcher, ResourceRequest};
