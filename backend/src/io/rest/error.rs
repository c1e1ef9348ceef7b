//! Translation of service errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::error;

use crate::domain::errors::DomainError;
use shared::ErrorResponse;

/// Status code for a service error: typed domain failures keep their
/// meaning, anything else is an internal failure
pub fn status_for(e: &anyhow::Error) -> StatusCode {
    match e.downcast_ref::<DomainError>() {
        Some(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(DomainError::Conflict(_)) => StatusCode::CONFLICT,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log and convert a service error. Internal details are not sent to the client.
pub fn error_response(action: &str, e: anyhow::Error) -> Response {
    let status = status_for(&e);
    error!("Failed to {}: {:#}", action, e);

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        format!("Error trying to {}", action)
    } else {
        e.to_string()
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// 400 response for a request the handler itself rejects
pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message.into() })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_status_for_domain_errors() {
        assert_eq!(status_for(&DomainError::validation("bad").into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&DomainError::not_found("gone").into()), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&DomainError::Conflict("dup".into()).into()), StatusCode::CONFLICT);
        assert_eq!(status_for(&anyhow!("disk full")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_context_does_not_hide_domain_error() {
        let e = anyhow::Error::from(DomainError::not_found("gone")).context("loading resident");
        assert_eq!(status_for(&e), StatusCode::NOT_FOUND);
    }
}
