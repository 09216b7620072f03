//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` validates a Bearer token and stores the
//!   `AuthenticatedUser` in request extensions
//! - `RequireAuth` pulls that user back out, or rejects with 401
//!
//! The middleware only depends on the `SessionValidator` port, so tests swap
//! in `MockSessionValidator` without touching routes.
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser in extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthError, AuthenticatedUser, CommandMetadata};
use crate::ports::SessionValidator;

pub type AuthState = Arc<dyn SessionValidator>;

/// Requests without a token pass through untouched; routes that need a
/// user enforce it with [`RequireAuth`]. A token that fails validation is
/// rejected here.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => auth_error_response(&err),
    }
}

fn auth_error_response(err: &AuthError) -> Response {
    let (status, message) = match err {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(error = %msg, "auth service unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "Authentication service unavailable")
        }
        _ => (StatusCode::UNAUTHORIZED, "Authentication failed"),
    };
    ApiError::new(status, "AUTH_ERROR", message).into_response()
}

/// Extractor for routes that need a signed-in user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl RequireAuth {
    pub fn metadata(&self) -> CommandMetadata {
        CommandMetadata::for_user(&self.0).with_source("http")
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(ApiError::unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{UserId, UserRole};

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("admin-1").unwrap(), "ops@iaircon.sg", UserRole::Admin)
    }

    #[tokio::test]
    async fn require_auth_reads_user_from_extensions() {
        let mut request = axum::http::Request::builder().uri("/api/bookings").body(()).unwrap();
        request.extensions_mut().insert(admin());
        let (mut parts, _) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.email, "ops@iaircon.sg");
    }

    #[tokio::test]
    async fn require_auth_rejects_anonymous_request() {
        let request = axum::http::Request::builder().uri("/api/bookings").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let err = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn metadata_carries_role() {
        let metadata = RequireAuth(admin()).metadata();
        assert!(metadata.is_admin());
        assert_eq!(metadata.source(), Some("http"));
    }

    #[test]
    fn unavailable_auth_service_is_503() {
        let response = auth_error_response(&AuthError::service_unavailable("jwks timeout"));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
