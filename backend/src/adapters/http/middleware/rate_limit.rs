//! Rate limiting middleware for axum.
//!
//! Authenticated callers are limited per user, everyone else per client IP.
//! Status is reported in the usual headers:
//! - `X-RateLimit-Limit`: Maximum requests allowed in the window
//! - `X-RateLimit-Remaining`: Requests remaining in the current window
//! - `X-RateLimit-Reset`: Unix timestamp when the window resets
//! - `Retry-After`: Seconds to wait (only on 429 response)
//!
//! Must run after `auth_middleware` so the user is already in extensions.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{RateLimitDenied, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter};

pub type RateLimiterState = Arc<dyn RateLimiter>;

pub mod headers {
    use super::HeaderName;

    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// Fails open: if the limiter itself errors, the request goes through.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiterState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let key = match request.extensions().get::<AuthenticatedUser>() {
        Some(user) => Some(RateLimitKey::user(&user.id)),
        None => client_ip(request.headers(), connect_info.as_ref()).map(|ip| RateLimitKey::ip(&ip)),
    };
    let Some(key) = key else {
        return next.run(request).await;
    };

    let status = match limiter.check(key).await {
        Ok(RateLimitResult::Allowed(status)) => Some(status),
        Ok(RateLimitResult::Denied(denied)) => return too_many_requests(&denied),
        Err(err) => {
            tracing::warn!(error = %err, "rate limiter unavailable");
            None
        }
    };

    let mut response = next.run(request).await;
    if let Some(status) = status {
        set_headers(response.headers_mut(), &status);
    }
    response
}

/// X-Forwarded-For (first hop), then X-Real-IP, then the socket address.
fn client_ip(headers: &HeaderMap, connect_info: Option<&ConnectInfo<SocketAddr>>) -> Option<String> {
    let forwarded = headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return Some(ip.to_string());
    }

    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        return Some(real_ip.trim().to_string());
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}

fn too_many_requests(denied: &RateLimitDenied) -> Response {
    let mut response = ApiError::new(
        StatusCode::TOO_MANY_REQUESTS,
        "RATE_LIMIT_EXCEEDED",
        "Too many requests, slow down",
    )
    .with_detail("scope", denied.scope.as_str())
    .with_detail("retry_after_secs", denied.retry_after_secs.to_string())
    .into_response();

    let headers = response.headers_mut();
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(denied.limit));
    headers.insert(headers::X_RATELIMIT_REMAINING.clone(), HeaderValue::from(0u32));
    headers.insert(header::RETRY_AFTER, HeaderValue::from(denied.retry_after_secs));
    response
}

fn set_headers(headers: &mut HeaderMap, status: &RateLimitStatus) {
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(status.limit));
    headers.insert(headers::X_RATELIMIT_REMAINING.clone(), HeaderValue::from(status.remaining));
    headers.insert(
        headers::X_RATELIMIT_RESET.clone(),
        HeaderValue::from(status.reset_at.as_unix_secs()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
    use axum::body::Body;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    fn app(per_ip: u32) -> Router {
        let limiter: RateLimiterState = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            per_ip,
            ..RateLimitConfig::default()
        }));
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
    }

    fn request(ip: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri("/ping")
            .header("X-Forwarded-For", ip)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn adds_headers_then_rejects_over_limit() {
        let app = app(1);

        let ok = app.clone().oneshot(request("203.0.113.7")).await.unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(ok.headers()[&headers::X_RATELIMIT_REMAINING], "0");

        let limited = app.oneshot(request("203.0.113.7")).await.unwrap();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(limited.headers().contains_key(header::RETRY_AFTER));
    }

    #[tokio::test]
    async fn separate_ips_have_separate_windows() {
        let app = app(1);
        assert_eq!(app.clone().oneshot(request("203.0.113.7")).await.unwrap().status(), StatusCode::OK);
        assert_eq!(app.oneshot(request("203.0.113.8")).await.unwrap().status(), StatusCode::OK);
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", HeaderValue::from_static("198.51.100.1, 10.0.0.1"));
        assert_eq!(client_ip(&headers, None).as_deref(), Some("198.51.100.1"));
    }
}
