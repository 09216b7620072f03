//! Request extractors that report malformed input as [`ApiError`].
//!
//! Thin wrappers over axum's extractors. Malformed input gets the same
//! `VALIDATION_ERROR` body as any other validation failure, with
//! `details.field` naming the input when the rejection says which.

use async_trait::async_trait;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

/// Query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let field = field_in(&message).unwrap_or("body").to_string();
        ApiError::bad_request(&field, message)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let field = match &rejection {
            PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
                ErrorKind::ParseErrorAtKey { key, .. } | ErrorKind::InvalidUtf8InPathParam { key } => {
                    key.clone()
                }
                _ => "path".to_string(),
            },
            _ => "path".to_string(),
        };
        ApiError::bad_request(&field, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let message = rejection.body_text();
        let field = field_in(&message).unwrap_or("query").to_string();
        ApiError::bad_request(&field, message)
    }
}

/// Pulls the field name out of a serde message such as
/// `"...target type: date: input contains invalid characters"` or
/// `"...: missing field `date`"`.
fn field_in(message: &str) -> Option<&str> {
    if let Some((_, rest)) = message.split_once("missing field `") {
        return rest.split_once('`').map(|(name, _)| name);
    }
    let (_, detail) = message.rsplit_once("target type: ")?;
    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && path != "." && !path.contains(' ')).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn field_comes_from_the_serde_path() {
        assert_eq!(
            field_in("Failed to deserialize the JSON body into the target type: date: input contains invalid characters at line 1 column 9"),
            Some("date")
        );
    }

    #[test]
    fn missing_field_is_named() {
        assert_eq!(
            field_in("Failed to deserialize query string: missing field `service_id`"),
            Some("service_id")
        );
    }

    #[test]
    fn syntax_errors_have_no_field() {
        assert_eq!(
            field_in("Failed to parse the request body as JSON: expected value at line 1 column 1"),
            None
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let req = Request::builder()
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{\"date\": \"next tuesday\"}"))
            .unwrap();

        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Body {
            date: chrono::NaiveDate,
        }

        let err = ApiJson::<Body>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, "VALIDATION_ERROR");
        assert_eq!(err.body.details.get("field").map(String::as_str), Some("date"));
    }
}
