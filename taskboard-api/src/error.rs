/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`. Every failure falls in one of three
/// buckets, each rendered as plain text:
///
/// | Variant | Status | Body |
/// |---|---|---|
/// | `BadRequest` | 400 | the message |
/// | `NotFound` | 404 | empty |
/// | `InternalError` | 500 | the underlying error text |
///
/// # Example
///
/// ```
/// use taskboard_api::error::{ApiError, ApiResult};
///
/// fn require(value: &str) -> ApiResult<&str> {
///     if value.is_empty() {
///         return Err(ApiError::BadRequest("value is required".to_string()));
///     }
///     Ok(value)
/// }
///
/// assert!(require("").is_err());
/// ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use taskboard_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400): malformed id, body or query
    BadRequest(String),

    /// Not found (404): no row, or an empty result set
    NotFound,

    /// Internal server error (500): anything the store reports
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!("Rejecting request: {}", msg);
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
        }
    }
}

/// Store failures, including duplicate emails, are internal errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Field validation failures, reported as `field: message` pairs sorted by field
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "is invalid".to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        details.sort();

        ApiError::BadRequest(details.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid status".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid status");

        assert_eq!(ApiError::NotFound.to_string(), "Not found");
    }

    #[tokio::test]
    async fn test_bad_request_is_plain_text() {
        let response =
            ApiError::BadRequest("No search parameters provided".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_text(response).await, "No search parameters provided");
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = ApiError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_duplicate_email_maps_to_internal_error() {
        let err: ApiError = StoreError::DuplicateEmail("a@x.com".to_string()).into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "User with this email already exists");
    }

    #[test]
    fn test_validation_errors_are_sorted() {
        let mut errors = validator::ValidationErrors::new();
        let mut role = validator::ValidationError::new("length");
        role.message = Some("role is required".into());
        let mut email = validator::ValidationError::new("length");
        email.message = Some("email is required".into());
        errors.add("role", role);
        errors.add("email", email);

        match ApiError::from(errors) {
            ApiError::BadRequest(msg) => {
                assert_eq!(msg, "email: email is required; role: role is required")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
