/// PostgreSQL-backed accessors
///
/// Each accessor owns a clone of the pool it was constructed with; there is
/// no process-wide handle.

use super::{ProjectStore, StoreResult, TaskStore, UserStore};
use crate::models::{NewProject, NewTask, NewUser, Priority, Project, Status, Task, User};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// [`UserStore`] over PostgreSQL
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn insert(&self, data: NewUser) -> StoreResult<()> {
        User::insert(&self.pool, &data).await?;
        debug!(email = %data.email, "Inserted user");
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: i32, data: NewUser) -> StoreResult<Option<User>> {
        Ok(User::update(&self.pool, id, &data).await?)
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>> {
        let deleted = User::delete(&self.pool, id).await?;
        debug!(user_id = id, deleted = deleted.is_some(), "Deleted user");
        Ok(deleted)
    }

    async fn search_by_email(&self, email: &str) -> StoreResult<Vec<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn search_by_name(&self, name: &str) -> StoreResult<Vec<User>> {
        Ok(User::find_by_name(&self.pool, name).await?)
    }

    async fn tasks_for(&self, user_id: i32) -> StoreResult<Vec<Task>> {
        Ok(Task::find_by_responsible_user(&self.pool, user_id).await?)
    }
}

/// [`TaskStore`] over PostgreSQL
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        Ok(Task::list(&self.pool).await?)
    }

    async fn create(&self, data: NewTask) -> StoreResult<()> {
        Task::insert(&self.pool, &data).await?;
        debug!(title = %data.title, project_id = data.project_id, "Inserted task");
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Task>> {
        Ok(Task::find_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: i32, data: NewTask) -> StoreResult<Option<Task>> {
        Ok(Task::update(&self.pool, id, &data).await?)
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>> {
        let deleted = Task::delete(&self.pool, id).await?;
        debug!(task_id = id, deleted = deleted.is_some(), "Deleted task");
        Ok(deleted)
    }

    async fn search_by_title(&self, title: &str) -> StoreResult<Vec<Task>> {
        Ok(Task::find_by_title(&self.pool, title).await?)
    }

    async fn search_by_status(&self, status: Status) -> StoreResult<Vec<Task>> {
        Ok(Task::find_by_status(&self.pool, status).await?)
    }

    async fn search_by_priority(&self, priority: Priority) -> StoreResult<Vec<Task>> {
        Ok(Task::find_by_priority(&self.pool, priority).await?)
    }

    async fn search_by_responsible_user(&self, user_id: i32) -> StoreResult<Vec<Task>> {
        Ok(Task::find_by_responsible_user(&self.pool, user_id).await?)
    }

    async fn search_by_project(&self, project_id: i32) -> StoreResult<Vec<Task>> {
        Ok(Task::find_by_project(&self.pool, project_id).await?)
    }
}

/// [`ProjectStore`] over PostgreSQL
#[derive(Debug, Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn list(&self) -> StoreResult<Vec<Project>> {
        Ok(Project::list(&self.pool).await?)
    }

    async fn create(&self, data: NewProject) -> StoreResult<()> {
        Project::insert(&self.pool, &data).await?;
        debug!(title = %data.title, manager_id = data.manager_id, "Inserted project");
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Project>> {
        Ok(Project::find_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: i32, data: NewProject) -> StoreResult<Option<Project>> {
        Ok(Project::update(&self.pool, id, &data).await?)
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>> {
        let deleted = Project::delete(&self.pool, id).await?;
        debug!(project_id = id, deleted = deleted.is_some(), "Deleted project");
        Ok(deleted)
    }

    async fn search_by_title(&self, title: &str) -> StoreResult<Vec<Project>> {
        Ok(Project::find_by_title(&self.pool, title).await?)
    }

    async fn search_by_manager(&self, manager_id: i32) -> StoreResult<Vec<Project>> {
        Ok(Project::find_by_manager(&self.pool, manager_id).await?)
    }

    async fn tasks_for(&self, project_id: i32) -> StoreResult<Vec<Task>> {
        Ok(Task::find_by_project(&self.pool, project_id).await?)
    }
}
