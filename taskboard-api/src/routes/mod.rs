/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Liveness endpoint
/// - `users`: User CRUD, search and assigned tasks
/// - `tasks`: Task CRUD and search
/// - `projects`: Project CRUD, search and project tasks

pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use crate::error::{ApiError, ApiResult};
use axum::Json;

/// Empty result sets are reported as 404
pub(crate) fn non_empty<T>(items: Vec<T>) -> ApiResult<Json<Vec<T>>> {
    if items.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(items))
}

/// Query values that are empty strings count as absent
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_rejects_empty_vec() {
        assert!(matches!(non_empty::<i32>(vec![]), Err(ApiError::NotFound)));
        assert_eq!(non_empty(vec![1, 2]).unwrap().0, vec![1, 2]);
    }

    #[test]
    fn test_present_drops_empty_strings() {
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(None), None);
        assert_eq!(present(Some("x".to_string())), Some("x".to_string()));
    }
}
