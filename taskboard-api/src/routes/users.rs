/// User endpoints
///
/// # Endpoints
///
/// - `GET /users` - List users
/// - `POST /users` - Create user (email must be unused)
/// - `GET /users/search?email=|name=` - Exact-match search, `email` first
/// - `GET /users/:id` - Fetch user
/// - `PUT /users/:id` - Replace user
/// - `DELETE /users/:id` - Delete user
/// - `GET /users/:id/tasks` - Tasks the user is responsible for

use super::{non_empty, present};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{IdPath, JsonBody, QueryParams},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::{NewUser, Task, User};
use validator::Validate;

/// Create and update request body
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

impl From<UserRequest> for NewUser {
    fn from(req: UserRequest) -> Self {
        NewUser {
            name: req.name,
            email: req.email,
            role: req.role,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserSearchParams {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Which column a user search runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Email(String),
    Name(String),
}

impl UserSearchParams {
    pub fn resolve(self) -> ApiResult<UserFilter> {
        present(self.email)
            .map(UserFilter::Email)
            .or_else(|| present(self.name).map(UserFilter::Name))
            .ok_or_else(|| ApiError::BadRequest("missing email or name parameter".to_string()))
    }
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    non_empty(state.users.list().await?)
}

/// Create user
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or an empty field
/// - `500 Internal Server Error`: email already taken, or a database failure
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UserRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    let email = req.email.clone();
    state.users.create(req.into()).await?;

    tracing::info!(email = %email, "User created");

    Ok(StatusCode::CREATED)
}

pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<User>> {
    let user = state.users.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<UserRequest>,
) -> ApiResult<StatusCode> {
    req.validate()?;

    state
        .users
        .update(id, req.into())
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(user_id = id, "User updated");

    Ok(StatusCode::OK)
}

pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.users.delete(id).await?.ok_or(ApiError::NotFound)?;

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::OK)
}

pub async fn search_users(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<UserSearchParams>,
) -> ApiResult<Json<Vec<User>>> {
    let users = match params.resolve()? {
        UserFilter::Email(email) => state.users.search_by_email(&email).await?,
        UserFilter::Name(name) => state.users.search_by_name(&name).await?,
    };
    non_empty(users)
}

pub async fn user_tasks(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<Vec<Task>>> {
    non_empty(state.users.tasks_for(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(email: Option<&str>, name: Option<&str>) -> UserSearchParams {
        UserSearchParams {
            email: email.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_email_takes_precedence() {
        assert_eq!(
            params(Some("a@x.com"), Some("A")).resolve().unwrap(),
            UserFilter::Email("a@x.com".to_string())
        );
    }

    #[test]
    fn test_empty_email_falls_back_to_name() {
        assert_eq!(
            params(Some(""), Some("A")).resolve().unwrap(),
            UserFilter::Name("A".to_string())
        );
    }

    #[test]
    fn test_no_parameters() {
        match params(None, Some("")).resolve() {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "missing email or name parameter"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_request_validation() {
        let req = UserRequest {
            name: "A".to_string(),
            email: String::new(),
            role: "admin".to_string(),
        };
        assert!(req.validate().is_err());

        let req = UserRequest {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            role: "admin".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
