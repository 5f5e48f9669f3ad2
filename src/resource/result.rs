//! What a resource handler hands back.

use serde_json::Value;

/// Structured result: a status with its message, plus the body to send.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceOutcome {
    pub status_code: u16,
    pub status_message: String,
    pub body: Value,
}

impl ResourceOutcome {
    pub fn new(status_code: u16, status_message: impl Into<String>, body: Value) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
            body,
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, "OK", body)
    }

    pub fn created(body: Value) -> Self {
        Self::new(201, "Created", body)
    }

    /// An outcome the dispatcher turns into an HTTP error (status should be above 201).
    pub fn error(status_code: u16, status_message: impl Into<String>) -> Self {
        Self::new(status_code, status_message, Value::Null)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResourceResult {
    /// Sent verbatim with the action's default status.
    Raw(Value),
    Outcome(ResourceOutcome),
}

impl From<Value> for ResourceResult {
    fn from(value: Value) -> Self {
        ResourceResult::Raw(value)
    }
}

impl From<ResourceOutcome> for ResourceResult {
    fn from(outcome: ResourceOutcome) -> Self {
        ResourceResult::Outcome(outcome)
    }
}
