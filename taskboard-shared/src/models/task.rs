/// Task model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
/// CREATE TYPE task_status AS ENUM ('new', 'in_progress', 'done');
///
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     priority task_priority NOT NULL,
///     status task_status NOT NULL,
///     responsible_user_id INTEGER NOT NULL,
///     project_id INTEGER NOT NULL,
///     creation_date DATE NOT NULL DEFAULT CURRENT_DATE,
///     completion_date DATE
/// );
/// ```
///
/// `responsible_user_id` and `project_id` are plain integers. Nothing checks
/// that the referenced user or project exists.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{NewTask, Priority, Status, Task};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// Task::insert(&pool, &NewTask {
///     title: "Write release notes".to_string(),
///     description: String::new(),
///     priority: Priority::High,
///     status: Status::New,
///     responsible_user_id: 1,
///     project_id: 1,
/// }).await?;
///
/// let urgent = Task::find_by_priority(&pool, Priority::High).await?;
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

/// Returned when a query value is not one of an enum's variants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    New,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }

    /// Whether the task has reached its final state
    ///
    /// Terminal tasks carry a `completion_date`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Done)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Status::New),
            "in_progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// A unit of work inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i32,

    pub title: String,

    pub description: String,

    pub priority: Priority,

    pub status: Status,

    /// User the task is assigned to
    pub responsible_user_id: i32,

    /// Project the task belongs to
    pub project_id: i32,

    #[serde(default, with = "crate::serde_date")]
    pub creation_date: Option<NaiveDate>,

    /// Empty until the task is finished
    #[serde(default, with = "crate::serde_date")]
    pub completion_date: Option<NaiveDate>,
}

/// Mutable task fields, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub responsible_user_id: i32,
    pub project_id: i32,
}

impl Task {
    /// Returns every task in the table's natural order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status, responsible_user_id,
                   project_id, creation_date, completion_date
            FROM tasks
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Inserts a task
    ///
    /// `creation_date` comes from the column default. A task created directly
    /// as `done` is stamped with today's `completion_date`.
    pub async fn insert(pool: &PgPool, data: &NewTask) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO tasks (title, description, priority, status, responsible_user_id,
                               project_id, completion_date)
            VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $7 THEN CURRENT_DATE END)
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.priority)
        .bind(data.status)
        .bind(data.responsible_user_id)
        .bind(data.project_id)
        .bind(data.status.is_terminal())
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Finds a task by ID, `None` if no row matches
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status, responsible_user_id,
                   project_id, creation_date, completion_date
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Replaces every mutable field of a task
    ///
    /// `completion_date` is stamped when the task moves to `done` and cleared
    /// when it leaves it. Returns `None` if the ID does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: &NewTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                priority = $4,
                status = $5,
                responsible_user_id = $6,
                project_id = $7,
                completion_date = CASE
                    WHEN $8 THEN COALESCE(completion_date, CURRENT_DATE)
                    ELSE NULL
                END
            WHERE id = $1
            RETURNING id, title, description, priority, status, responsible_user_id,
                      project_id, creation_date, completion_date
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.priority)
        .bind(data.status)
        .bind(data.responsible_user_id)
        .bind(data.project_id)
        .bind(data.status.is_terminal())
        .fetch_optional(pool)
        .await
    }

    /// Deletes a task by ID, returning the deleted ID if a row matched
    pub async fn delete(pool: &PgPool, id: i32) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("DELETE FROM tasks WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact-match lookup on `title`
    pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status, responsible_user_id,
                   project_id, creation_date, completion_date
            FROM tasks
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_status(pool: &PgPool, status: Status) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status, responsible_user_id,
                   project_id, creation_date, completion_date
            FROM tasks
            WHERE status = $1
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_priority(
        pool: &PgPool,
        priority: Priority,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status, responsible_user_id,
                   project_id, creation_date, completion_date
            FROM tasks
            WHERE priority = $1
            "#,
        )
        .bind(priority)
        .fetch_all(pool)
        .await
    }

    /// Tasks assigned to a user
    pub async fn find_by_responsible_user(
        pool: &PgPool,
        user_id: i32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status, responsible_user_id,
                   project_id, creation_date, completion_date
            FROM tasks
            WHERE responsible_user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Tasks belonging to a project
    pub async fn find_by_project(pool: &PgPool, project_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status, responsible_user_id,
                   project_id, creation_date, completion_date
            FROM tasks
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
