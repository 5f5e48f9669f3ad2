//! Resource handler capabilities and the values they exchange with the dispatcher.

mod result;

pub use result::{ResourceOutcome, ResourceResult};

use crate::error::AppError;
use async_trait::async_trait;
use axum::body::Bytes;
use serde::{de::DeserializeOwned, Serialize};

/// Per-request data every handler method can read.
#[derive(Clone, Debug, Default)]
pub struct ResourceContext {
    /// Path identifier for `GET /resource/:id` and friends.
    pub id: Option<String>,
    /// All query parameters, including `resourceDir` and `resourceName`.
    pub query: QueryParams,
}

/// Query parameters in the order they appear in the URI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// Value of `key` (exact case). A repeated key yields its last value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The full CRUD capability set. One fresh instance serves one request.
#[async_trait]
pub trait RestResource: Send {
    /// `GET /resource`
    async fn index(&mut self, ctx: &ResourceContext) -> ResourceResult;
    /// `GET /resource/:id`
    async fn view(&mut self, ctx: &ResourceContext) -> ResourceResult;
    /// `POST /resource`
    async fn create(&mut self, ctx: &ResourceContext) -> ResourceResult;
    /// `PATCH /resource`
    async fn update(&mut self, ctx: &ResourceContext) -> ResourceResult;
    /// `DELETE /resource`
    async fn delete(&mut self, ctx: &ResourceContext) -> ResourceResult;
    /// `PUT /resource`
    async fn upsert(&mut self, ctx: &ResourceContext) -> ResourceResult;
}

/// Plain data container populated from the request before the handler runs.
///
/// Its fields are whatever `Self::default()` serializes to; each must be readable back through
/// `Deserialize`. Any serde struct with a `Default` qualifies.
pub trait InputData: Default + Serialize + DeserializeOwned + Send + 'static {}

impl<T> InputData for T where T: Default + Serialize + DeserializeOwned + Send + 'static {}

/// Handlers that take a typed input container.
pub trait AcceptsInput: RestResource {
    type Input: InputData;

    fn set_input_data(&mut self, input: Self::Input);

    fn input_data_type_name(&self) -> &'static str {
        std::any::type_name::<Self::Input>()
    }
}

/// Raw request data available to binders.
#[derive(Clone, Copy, Debug)]
pub struct RequestSource<'a> {
    pub body: &'a Bytes,
    pub query: &'a QueryParams,
}

/// Replaces default binding for one input type.
pub trait InputFiller<I: InputData>: Send + Sync {
    fn fill(&self, input: &mut I, source: RequestSource<'_>) -> Result<(), AppError>;
}
