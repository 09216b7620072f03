//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes. Everything
//! shares [`AppState`] and reports failures as [`ApiError`].
//!
//! # Middleware order (outermost first)
//!
//! 1. Request ID (set, then propagated to the response)
//! 2. `TraceLayer`
//! 3. Timeout, compression, CORS
//! 4. `auth_middleware` (attaches the user when a token is present)
//! 5. `rate_limit_middleware` (per user, else per client IP)

pub mod address;
pub mod booking;
pub mod error;
pub mod extract;
pub mod greeting;
pub mod middleware;
pub mod payment;
pub mod profile;
pub mod state;
pub mod system;

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorResponse};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use state::AppState;

use self::middleware::{auth_middleware, rate_limit_middleware};

/// Transport settings for [`router`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub request_timeout: Duration,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            allowed_origins: Vec::new(),
        }
    }
}

/// Builds the full `/api` router.
pub fn router(state: AppState, options: &HttpOptions) -> Router {
    let api = Router::new()
        .nest("/bookings", booking::booking_routes())
        .nest("/addresses", address::address_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/payments", payment::payment_routes())
        .nest("/admin/greetings", greeting::greeting_routes())
        .merge(system::system_routes());

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(options.request_timeout))
                .layer(CompressionLayer::new())
                .layer(cors_layer(&options.allowed_origins)),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring malformed CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any)
}
