/// Storage accessors
///
/// One trait per entity, each a thin typed facade over the SQL in
/// [`crate::models`]. The HTTP layer only ever sees these traits, which lets
/// handler tests swap in the doubles from [`mock`].
///
/// # Contract
///
/// - `get_by_id`, `update` and `delete` return `Ok(None)` when no row
///   matches. That is not an error.
/// - Searches are exact matches on a single column.
/// - `update` replaces every mutable field.
/// - Database errors are passed through untouched. Nothing is retried.
/// - [`UserStore::create`] looks the email up before inserting and refuses
///   duplicates. The check and the insert are separate statements, so two
///   concurrent creates with the same email can both succeed.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_shared::store::{PgUserStore, UserStore};
/// use taskboard_shared::models::NewUser;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
/// users.create(NewUser {
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     role: "admin".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod mock;
mod postgres;

pub use postgres::{PgProjectStore, PgTaskStore, PgUserStore};

use crate::models::{NewProject, NewTask, NewUser, Priority, Project, Status, Task, User};
use async_trait::async_trait;

/// Storage accessor errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A user with this email already exists
    #[error("User with this email already exists")]
    DuplicateEmail(String),

    /// Any failure reported by the database driver
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// User accessor
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Inserts without checking for duplicates. Prefer [`UserStore::create`].
    async fn insert(&self, data: NewUser) -> StoreResult<()>;

    /// Creates a user unless the email is already taken
    async fn create(&self, data: NewUser) -> StoreResult<()> {
        create_unique(self, data).await
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<User>>;

    async fn update(&self, id: i32, data: NewUser) -> StoreResult<Option<User>>;

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>>;

    async fn search_by_email(&self, email: &str) -> StoreResult<Vec<User>>;

    async fn search_by_name(&self, name: &str) -> StoreResult<Vec<User>>;

    /// Tasks whose `responsible_user_id` is `user_id`
    async fn tasks_for(&self, user_id: i32) -> StoreResult<Vec<Task>>;
}

/// Email existence check followed by insert
///
/// Shared by the default [`UserStore::create`] and the mock so both follow
/// the same rule.
pub async fn create_unique<S>(store: &S, data: NewUser) -> StoreResult<()>
where
    S: UserStore + ?Sized,
{
    let existing = store.search_by_email(&data.email).await?;
    if !existing.is_empty() {
        tracing::debug!(email = %data.email, "Rejecting user with duplicate email");
        return Err(StoreError::DuplicateEmail(data.email));
    }

    store.insert(data).await
}

/// Task accessor
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Task>>;

    async fn create(&self, data: NewTask) -> StoreResult<()>;

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Task>>;

    async fn update(&self, id: i32, data: NewTask) -> StoreResult<Option<Task>>;

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>>;

    async fn search_by_title(&self, title: &str) -> StoreResult<Vec<Task>>;

    async fn search_by_status(&self, status: Status) -> StoreResult<Vec<Task>>;

    async fn search_by_priority(&self, priority: Priority) -> StoreResult<Vec<Task>>;

    async fn search_by_responsible_user(&self, user_id: i32) -> StoreResult<Vec<Task>>;

    async fn search_by_project(&self, project_id: i32) -> StoreResult<Vec<Task>>;
}

/// Project accessor
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Project>>;

    async fn create(&self, data: NewProject) -> StoreResult<()>;

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Project>>;

    async fn update(&self, id: i32, data: NewProject) -> StoreResult<Option<Project>>;

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>>;

    async fn search_by_title(&self, title: &str) -> StoreResult<Vec<Project>>;

    async fn search_by_manager(&self, manager_id: i32) -> StoreResult<Vec<Project>>;

    /// Tasks whose `project_id` is `project_id`
    async fn tasks_for(&self, project_id: i32) -> StoreResult<Vec<Task>>;
}

#[cfg(test)]
mod tests {
    use super::mock::MockUserStore;
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn existing_user() -> User {
        User {
            id: 1,
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            registration_date: None,
            role: "admin".to_string(),
        }
    }

    fn new_user() -> NewUser {
        NewUser {
            name: "B".to_string(),
            email: "a@x.com".to_string(),
            role: "dev".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_skips_insert() {
        let inserts = Arc::new(AtomicUsize::new(0));
        let counter = inserts.clone();
        let store = MockUserStore::new()
            .on_search_by_email(|_| Ok(vec![existing_user()]))
            .on_insert(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });

        let err = store.create(new_user()).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail(ref email) if email == "a@x.com"));
        assert_eq!(err.to_string(), "User with this email already exists");
        assert_eq!(inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unique_email_inserts_once() {
        let inserts = Arc::new(AtomicUsize::new(0));
        let counter = inserts.clone();
        let store = MockUserStore::new().on_insert(move |data| {
            assert_eq!(data.email, "a@x.com");
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        store.create(new_user()).await.unwrap();
        assert_eq!(inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let store = MockUserStore::new()
            .on_search_by_email(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let err = store.create(new_user()).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolTimedOut)));
    }
}
