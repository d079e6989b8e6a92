/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks` - List tasks
/// - `POST /tasks` - Create task
/// - `GET /tasks/search?title=|status=|priority=|assignee=|project=` - Search
/// - `GET /tasks/:id` - Fetch task
/// - `PUT /tasks/:id` - Replace task
/// - `DELETE /tasks/:id` - Delete task
///
/// # Search
///
/// Parameters are considered in the order title, status, priority, assignee,
/// project and the last one supplied decides the query. Every supplied value
/// is still validated, so `?status=bogus&project=1` is a 400.

use super::{non_empty, present};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{parse_id, IdPath, JsonBody, QueryParams},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::{NewTask, Priority, Status, Task};

/// Create and update request body
///
/// `priority` and `status` must be valid enum values or the body is rejected.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub priority: Priority,

    pub status: Status,

    pub responsible_user_id: i32,

    pub project_id: i32,
}

impl From<TaskRequest> for NewTask {
    fn from(req: TaskRequest) -> Self {
        NewTask {
            title: req.title,
            description: req.description,
            priority: req.priority,
            status: req.status,
            responsible_user_id: req.responsible_user_id,
            project_id: req.project_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskSearchParams {
    pub title: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub project: Option<String>,
}

/// The single query a task search runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    Title(String),
    Status(Status),
    Priority(Priority),
    Assignee(i32),
    Project(i32),
}

impl TaskSearchParams {
    pub fn resolve(self) -> ApiResult<TaskFilter> {
        let title = present(self.title);

        let status = present(self.status)
            .map(|raw| {
                raw.parse::<Status>()
                    .map_err(|_| ApiError::BadRequest("Invalid status".to_string()))
            })
            .transpose()?;

        let priority = present(self.priority)
            .map(|raw| {
                raw.parse::<Priority>()
                    .map_err(|_| ApiError::BadRequest("Invalid priority".to_string()))
            })
            .transpose()?;

        let assignee = present(self.assignee)
            .map(|raw| parse_id(&raw))
            .transpose()?;

        let project = present(self.project)
            .map(|raw| parse_id(&raw))
            .transpose()?;

        project
            .map(TaskFilter::Project)
            .or(assignee.map(TaskFilter::Assignee))
            .or(priority.map(TaskFilter::Priority))
            .or(status.map(TaskFilter::Status))
            .or(title.map(TaskFilter::Title))
            .ok_or_else(|| ApiError::BadRequest("No search parameters provided".to_string()))
    }
}

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    non_empty(state.tasks.list().await?)
}

pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TaskRequest>,
) -> ApiResult<StatusCode> {
    let project_id = req.project_id;
    state.tasks.create(req.into()).await?;

    tracing::info!(project_id, "Task created");

    Ok(StatusCode::CREATED)
}

pub async fn get_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(req): JsonBody<TaskRequest>,
) -> ApiResult<StatusCode> {
    let task = state
        .tasks
        .update(id, req.into())
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(task_id = id, status = %task.status, "Task updated");

    Ok(StatusCode::OK)
}

pub async fn delete_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.tasks.delete(id).await?.ok_or(ApiError::NotFound)?;

    tracing::info!(task_id = id, "Task deleted");

    Ok(StatusCode::OK)
}

pub async fn search_tasks(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TaskSearchParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = params.resolve()?;
    tracing::debug!(?filter, "Searching tasks");

    let tasks = match filter {
        TaskFilter::Title(title) => state.tasks.search_by_title(&title).await?,
        TaskFilter::Status(status) => state.tasks.search_by_status(status).await?,
        TaskFilter::Priority(priority) => state.tasks.search_by_priority(priority).await?,
        TaskFilter::Assignee(user_id) => state.tasks.search_by_responsible_user(user_id).await?,
        TaskFilter::Project(project_id) => state.tasks.search_by_project(project_id).await?,
    };
    non_empty(tasks)
}
