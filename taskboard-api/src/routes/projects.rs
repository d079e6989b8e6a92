/// Project endpoints
///
/// # Endpoints
///
/// - `GET /projects` - List projects
/// - `POST /projects` - Create project
/// - `GET /projects/search?title=|manager=` - Exact-match search, `title` first
/// - `GET /projects/:id` - Fetch project
/// - `PUT /projects/:id` - Replace project
/// - `DELETE /projects/:id` - Delete project
/// - `GET /projects/:id/tasks` - Tasks belonging to the project

use super::{non_empty, present};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{parse_id, IdPath, JsonBody, QueryParams},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::{NewProject, Project, Task};

/// Create and update request body
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub manager_id: i32,
}

impl From<ProjectRequest> for NewProject {
    fn from(req: ProjectRequest) -> Self {
        NewProject {
            title: req.title,
            description: req.description,
            manager_id: req.manager_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectSearchParams {
    pub title: Option<String>,
    pub manager: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    Title(String),
    Manager(i32),
}

impl ProjectSearchParams {
    pub fn resolve(self) -> ApiResult<ProjectFilter> {
        if let Some(title) = present(self.title) {
            return Ok(ProjectFilter::Title(title));
        }

        match present(self.manager) {
            Some(raw) => parse_id(&raw).map(ProjectFilter::Manager),
            None => Err(ApiError::BadRequest("invalid search parameters".to_string())),
        }
    }
}

pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    non_empty(state.projects.list().await?)
}

pub async fn create_project(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ProjectRequest>,
) -> ApiResult<StatusCode> {
    let manager_id = req.manager_id;
    state.projects.create(req.into()).await?;

    tracing::info!(manager_id, "Project created");

    Ok(StatusCode::CREATED)
}

pub async fn get_project(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<Project>> {
    let project = state
        .projects
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<ProjectRequest>,
) -> ApiResult<StatusCode> {
    state
        .projects
        .update(id, req.into())
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(project_id = id, "Project updated");

    Ok(StatusCode::OK)
}

pub async fn delete_project(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.projects.delete(id).await?.ok_or(ApiError::NotFound)?;

    tracing::info!(project_id = id, "Project deleted");

    Ok(StatusCode::OK)
}

pub async fn search_projects(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ProjectSearchParams>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = match params.resolve()? {
        ProjectFilter::Title(title) => state.projects.search_by_title(&title).await?,
        ProjectFilter::Manager(manager_id) => state.projects.search_by_manager(manager_id).await?,
    };
    non_empty(projects)
}

pub async fn project_tasks(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<Vec<Task>>> {
    non_empty(state.projects.tasks_for(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_takes_precedence() {
        let params = ProjectSearchParams {
            title: Some("Apollo".to_string()),
            manager: Some("not-a-number".to_string()),
        };
        assert_eq!(
            params.resolve().unwrap(),
            ProjectFilter::Title("Apollo".to_string())
        );
    }

    #[test]
    fn test_manager_must_be_an_id() {
        let params = ProjectSearchParams {
            title: None,
            manager: Some("4".to_string()),
        };
        assert_eq!(params.resolve().unwrap(), ProjectFilter::Manager(4));

        let params = ProjectSearchParams {
            title: None,
            manager: Some("x".to_string()),
        };
        assert!(matches!(params.resolve(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_no_parameters() {
        match ProjectSearchParams::default().resolve() {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "invalid search parameters"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
