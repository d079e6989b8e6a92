/// Project model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id SERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     creation_date DATE NOT NULL DEFAULT CURRENT_DATE,
///     completion_date DATE,
///     manager_id INTEGER NOT NULL
/// );
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A project grouping tasks under one manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i32,

    pub title: String,

    pub description: String,

    #[serde(default, with = "crate::serde_date")]
    pub creation_date: Option<NaiveDate>,

    /// Empty while the project is open
    #[serde(default, with = "crate::serde_date")]
    pub completion_date: Option<NaiveDate>,

    /// User managing the project (not checked against `users`)
    pub manager_id: i32,
}

/// Mutable project fields, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub manager_id: i32,
}

impl Project {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, creation_date, completion_date, manager_id
            FROM projects
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn insert(pool: &PgPool, data: &NewProject) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO projects (title, description, manager_id)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.manager_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, creation_date, completion_date, manager_id
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Replaces title, description and manager; `None` if the ID does not exist
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: &NewProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = $2, description = $3, manager_id = $4
            WHERE id = $1
            RETURNING id, title, description, creation_date, completion_date, manager_id
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.manager_id)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a project by ID, returning the deleted ID if a row matched
    ///
    /// Tasks referencing the project are left in place.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("DELETE FROM projects WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, creation_date, completion_date, manager_id
            FROM projects
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_manager(pool: &PgPool, manager_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, creation_date, completion_date, manager_id
            FROM projects
            WHERE manager_id = $1
            "#,
        )
        .bind(manager_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_json_field_order() {
        let project = Project {
            id: 2,
            title: "Apollo".to_string(),
            description: "Moon".to_string(),
            creation_date: NaiveDate::from_ymd_opt(2024, 2, 29),
            completion_date: None,
            manager_id: 5,
        };

        assert_eq!(
            serde_json::to_string(&project).unwrap(),
            r#"{"id":2,"title":"Apollo","description":"Moon","creation_date":"2024-02-29","completion_date":"","manager_id":5}"#
        );
    }

    #[test]
    fn test_project_deserialize_with_empty_dates() {
        let project: Project = serde_json::from_str(
            r#"{"id":1,"title":"t","description":"d","creation_date":"","completion_date":"","manager_id":3}"#,
        )
        .unwrap();

        assert_eq!(project.creation_date, None);
        assert_eq!(project.completion_date, None);
        assert_eq!(project.manager_id, 3);
    }
}
