/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     email TEXT NOT NULL,
///     registration_date DATE NOT NULL DEFAULT CURRENT_DATE,
///     role TEXT NOT NULL
/// );
/// ```
///
/// `email` carries no unique constraint. Uniqueness is checked by
/// [`crate::store::PgUserStore`] before inserting.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{NewUser, User};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// User::insert(&pool, &NewUser {
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     role: "admin".to_string(),
/// }).await?;
///
/// let found = User::find_by_email(&pool, "ada@example.com").await?;
/// assert_eq!(found.len(), 1);
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,

    pub name: String,

    /// Unique per application-level check, not per schema
    pub email: String,

    /// Set by the database on insert; serialized as `""` when unknown
    #[serde(default, with = "crate::serde_date")]
    pub registration_date: Option<NaiveDate>,

    /// Free-form role label (e.g. "admin", "developer")
    pub role: String,
}

/// Mutable user fields, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    /// Returns every user in the table's natural order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, registration_date, role
            FROM users
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Inserts a user without any duplicate check
    ///
    /// `registration_date` is filled in by the column default.
    pub async fn insert(pool: &PgPool, data: &NewUser) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (name, email, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.role)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Finds a user by ID, `None` if no row matches
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, registration_date, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Replaces name, email and role of an existing user
    ///
    /// Returns the updated row, or `None` if the ID does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: &NewUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3, role = $4
            WHERE id = $1
            RETURNING id, name, email, registration_date, role
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.role)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a user by ID
    ///
    /// Returns the deleted ID, or `None` if nothing matched. Tasks assigned to
    /// the user are left untouched.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("DELETE FROM users WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact-match lookup on `email`
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, registration_date, role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_all(pool)
        .await
    }

    /// Exact-match lookup on `name`
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, registration_date, role
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: 1,
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            registration_date: None,
            role: "admin".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"A","email":"a@x.com","registration_date":"","role":"admin"}"#
        );
    }

    #[test]
    fn test_registration_date_serialized_when_present() {
        let user = User {
            id: 7,
            name: "B".to_string(),
            email: "b@x.com".to_string(),
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            role: "dev".to_string(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["registration_date"], "2024-01-15");
    }

    #[test]
    fn test_new_user_deserialize() {
        let data: NewUser =
            serde_json::from_str(r#"{"name":"A","email":"a@x.com","role":"admin"}"#).unwrap();
        assert_eq!(data.name, "A");
        assert_eq!(data.email, "a@x.com");
        assert_eq!(data.role, "admin");
    }
}
