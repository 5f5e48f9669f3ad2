//! Input binding: build a handler's input container from the request body and query string.

use super::fields::{BoundFields, FieldValue};
use crate::case::{object_keys_to_lowercase, query_keys_to_lowercase};
use crate::error::{AppError, MESSAGE_INVALID_JSON};
use crate::resource::{InputData, InputFiller, QueryParams, RequestSource};
use axum::body::Bytes;
use serde_json::Value;
use std::collections::HashMap;

pub struct InputBinder;

impl InputBinder {
    /// Create a fresh container and populate it, through the filler when one is registered.
    pub fn bind<I: InputData>(
        filler: Option<&dyn InputFiller<I>>,
        source: RequestSource<'_>,
    ) -> Result<I, AppError> {
        let mut input = I::default();
        match filler {
            Some(filler) => {
                tracing::debug!(input = std::any::type_name::<I>(), "binding input through custom filler");
                filler.fill(&mut input, source)?;
            }
            None => Self::fill(&mut input, source.body, source.query)?,
        }
        Ok(input)
    }

    /// Default binding. Body keys are matched first; fields left unmatched are then looked up in
    /// the query string. Both matches ignore case, and a `null` body value does not count as a match.
    /// Query values are parsed into the type of the field they land in.
    pub fn fill<I: InputData>(
        container: &mut I,
        body: &Bytes,
        query: &QueryParams,
    ) -> Result<(), AppError> {
        let mut fields = match serde_json::to_value(&*container) {
            Ok(Value::Object(fields)) => fields,
            _ => {
                return Err(AppError::Internal(format!(
                    "input data type '{}' does not expose named fields",
                    std::any::type_name::<I>()
                )))
            }
        };
        let mut unmatched: HashMap<String, String> = fields
            .keys()
            .map(|name| (name.to_lowercase(), name.clone()))
            .collect();

        let params = decode_body(body)?;
        if !params.is_empty() {
            unmatched.retain(|lowercase, name| match params.get(lowercase) {
                Some(value) if !value.is_null() => {
                    fields.insert(name.clone(), value.clone());
                    false
                }
                _ => true,
            });
        }

        let mut query = query_keys_to_lowercase(query);
        let mut from_query: HashMap<String, String> = unmatched
            .into_iter()
            .filter_map(|(lowercase, name)| query.remove(&lowercase).map(|raw| (name, raw)))
            .collect();

        let bound = fields
            .into_iter()
            .map(|(name, value)| match from_query.remove(&name) {
                Some(raw) => (name, FieldValue::Query(raw)),
                None => (name, FieldValue::Json(value)),
            })
            .collect();
        *container = I::deserialize(BoundFields(bound)).map_err(|e| {
            tracing::debug!(error = %e, "bound values do not fit the input type");
            AppError::InvalidInput(e.to_string())
        })?;
        Ok(())
    }
}

/// Decode the raw body into lower-cased keys. An empty body (or a lone "0") yields no keys.
/// Anything but a JSON object or array is rejected; arrays are keyed by index.
pub fn decode_body(body: &Bytes) -> Result<HashMap<String, Value>, AppError> {
    if body.is_empty() || body.as_ref() == b"0" {
        return Ok(HashMap::new());
    }
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "request body is not valid JSON");
        AppError::BadRequest(MESSAGE_INVALID_JSON.into())
    })?;
    match value {
        Value::Object(obj) => Ok(object_keys_to_lowercase(obj)),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect()),
        _ => Err(AppError::BadRequest(MESSAGE_INVALID_JSON.into())),
    }
}

/// Field names of an input type, as enumerated by default binding.
pub fn input_field_names<I: InputData>() -> Vec<String> {
    match serde_json::to_value(I::default()) {
        Ok(Value::Object(fields)) => fields.keys().cloned().collect(),
        _ => Vec::new(),
    }
}
