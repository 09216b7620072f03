//! API error type shared by every route.
//!
//! Converts domain errors to HTTP responses. The body is always
//! `{"code": "...", "message": "...", "details": {...}}`, with `details`
//! omitted when empty.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `SLOT_UNAVAILABLE`.
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.details.insert(key.into(), value.into());
        self
    }

    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message).with_detail("field", field)
    }

    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", "Authentication required")
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,

        ErrorCode::BookingNotFound
        | ErrorCode::AddressNotFound
        | ErrorCode::ServiceNotFound
        | ErrorCode::ProfileNotFound
        | ErrorCode::PaymentSessionNotFound
        | ErrorCode::GreetingNotFound => StatusCode::NOT_FOUND,

        ErrorCode::InvalidStateTransition
        | ErrorCode::SlotUnavailable
        | ErrorCode::CapacityExceeded
        | ErrorCode::AlreadyExists => StatusCode::CONFLICT,

        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::ServiceError => StatusCode::BAD_GATEWAY,
        ErrorCode::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,

        ErrorCode::DatabaseError | ErrorCode::CacheError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = status_for(err.code);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %err.code, error = %err.message, "request failed");
            // Infrastructure detail stays in the logs.
            return Self::new(status, err.code.to_string(), "Internal server error");
        }
        Self {
            status,
            body: ErrorResponse {
                code: err.code.to_string(),
                message: err.message,
                details: err.details.into_iter().collect(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_keeps_field_detail() {
        let err = ApiError::from(DomainError::validation("postal_code", "must be 6 digits"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, "VALIDATION_ERROR");
        assert_eq!(err.body.details.get("field").map(String::as_str), Some("postal_code"));
    }

    #[test]
    fn ownership_mismatch_is_401_and_admin_only_is_403() {
        let unauthorized = ApiError::from(DomainError::new(ErrorCode::Unauthorized, "not yours"));
        let forbidden = ApiError::from(DomainError::new(ErrorCode::Forbidden, "admins only"));
        assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unauthorized.body.code, "UNAUTHORIZED");
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflicts_map_to_409() {
        let slot = ApiError::from(DomainError::new(ErrorCode::SlotUnavailable, "taken"));
        let transition = ApiError::from(DomainError::new(ErrorCode::InvalidStateTransition, "no"));
        assert_eq!(slot.status, StatusCode::CONFLICT);
        assert_eq!(transition.body.code, "INVALID_STATUS_TRANSITION");
    }

    #[test]
    fn vendor_failure_is_bad_gateway() {
        let err = ApiError::from(DomainError::new(ErrorCode::ServiceError, "stripe down"));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn database_message_is_not_leaked() {
        let err = ApiError::from(DomainError::new(ErrorCode::DatabaseError, "relation bookings does not exist"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.message, "Internal server error");
    }

    #[test]
    fn empty_details_are_omitted() {
        let json = serde_json::to_value(ErrorResponse::new("FORBIDDEN", "no")).unwrap();
        assert!(json.get("details").is_none());
    }
}
