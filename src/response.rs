//! Translate a handler's result into an HTTP response.

use crate::error::AppError;
use crate::resource::ResourceResult;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

/// Highest handler status still sent as a normal response; anything above is an HTTP error.
pub const MAX_SUCCESS_STATUS: u16 = 201;

/// Outcomes with a status up to 201 are sent as-is; above that they become an HTTP error carrying
/// the handler's message. Raw values go out with `default_status`.
pub fn send_result(result: ResourceResult, default_status: StatusCode) -> Result<Response, AppError> {
    match result {
        ResourceResult::Outcome(outcome) => {
            let status = StatusCode::from_u16(outcome.status_code).map_err(|_| {
                AppError::Internal(format!("resource returned invalid status {}", outcome.status_code))
            })?;
            if outcome.status_code > MAX_SUCCESS_STATUS {
                tracing::debug!(status = outcome.status_code, message = %outcome.status_message, "resource reported an error");
                return Err(AppError::Http {
                    status,
                    message: outcome.status_message,
                });
            }
            Ok(body_response(status, outcome.body))
        }
        ResourceResult::Raw(value) => Ok(body_response(default_status, value)),
    }
}

fn body_response(status: StatusCode, body: Value) -> Response {
    if body.is_null() {
        return status.into_response();
    }
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceOutcome;
    use serde_json::json;

    #[test]
    fn created_outcome_keeps_its_status() {
        let result = ResourceOutcome::created(json!({"id": 1})).into();
        let response = send_result(result, StatusCode::OK).unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn outcome_overrides_default_status() {
        let result = ResourceOutcome::ok(json!([])).into();
        let response = send_result(result, StatusCode::CREATED).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn status_above_201_becomes_http_error() {
        for code in [202, 204, 404, 422] {
            let result = ResourceOutcome::error(code, "nope").into();
            let err = send_result(result, StatusCode::OK).unwrap_err();
            assert_eq!(err.status().as_u16(), code);
            assert_eq!(err.message(), "nope");
        }
    }

    #[test]
    fn invalid_status_is_internal() {
        let result = ResourceOutcome::error(42, "?").into();
        assert!(matches!(send_result(result, StatusCode::OK), Err(AppError::Internal(_))));
    }

    #[test]
    fn raw_value_uses_default_status() {
        let response = send_result(json!("done").into(), StatusCode::CREATED).unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
