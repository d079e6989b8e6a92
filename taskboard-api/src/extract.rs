/// Request extractors that reject with `400 Bad Request`
///
/// axum's own `Json` and `Query` answer some malformed input with 415 or
/// 422. These wrappers funnel every rejection through [`ApiError`] so the
/// client always gets a 400 with a plain-text reason.

use crate::error::{ApiError, ApiResult};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// Single `{id}` path segment parsed as a non-negative `i32`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_id(&raw).map(IdPath)
    }
}

/// Parses an entity id from a path segment or query value
///
/// Ids are non-negative and must fit the `SERIAL` column.
pub fn parse_id(raw: &str) -> ApiResult<i32> {
    raw.parse::<u32>()
        .map_err(|e| e.to_string())
        .and_then(|id| i32::try_from(id).map_err(|e| e.to_string()))
        .map_err(|reason| ApiError::BadRequest(format!("invalid id '{}': {}", raw, reason)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_digits() {
        assert_eq!(parse_id("0").unwrap(), 0);
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("2147483647").unwrap(), i32::MAX);
    }

    #[test]
    fn test_parse_id_rejects_negative_and_garbage() {
        for raw in ["-1", "abc", "", "1.5", " 7"] {
            assert!(
                matches!(parse_id(raw), Err(ApiError::BadRequest(_))),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_parse_id_rejects_overflow() {
        match parse_id("2147483648") {
            Err(ApiError::BadRequest(msg)) => assert!(msg.starts_with("invalid id '2147483648'")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
