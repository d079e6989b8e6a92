/// In-memory test doubles for the accessor traits
///
/// Every method has an optional override hook installed with an `on_*`
/// builder. Without a hook a method returns the empty value: `Ok(vec![])`,
/// `Ok(None)` or `Ok(())`. [`MockUserStore::create`] without a hook runs the
/// real duplicate-email rule against the `search_by_email` and `insert` hooks.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::User;
/// use taskboard_shared::store::{mock::MockUserStore, UserStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MockUserStore::new().on_get_by_id(|id| {
///     Ok(Some(User {
///         id,
///         name: "Test User".to_string(),
///         email: "test@example.com".to_string(),
///         registration_date: None,
///         role: "admin".to_string(),
///     }))
/// });
///
/// let user = store.get_by_id(4).await.unwrap().unwrap();
/// assert_eq!(user.id, 4);
/// assert!(store.list().await.unwrap().is_empty());
/// # }
/// ```

use super::{create_unique, ProjectStore, StoreResult, TaskStore, UserStore};
use crate::models::{NewProject, NewTask, NewUser, Priority, Project, Status, Task, User};
use async_trait::async_trait;

type Hook<A, R> = Box<dyn Fn(A) -> StoreResult<R> + Send + Sync>;

/// [`UserStore`] double
#[derive(Default)]
pub struct MockUserStore {
    list: Option<Hook<(), Vec<User>>>,
    insert: Option<Hook<NewUser, ()>>,
    create: Option<Hook<NewUser, ()>>,
    get_by_id: Option<Hook<i32, Option<User>>>,
    update: Option<Hook<(i32, NewUser), Option<User>>>,
    delete: Option<Hook<i32, Option<i32>>>,
    search_by_email: Option<Hook<String, Vec<User>>>,
    search_by_name: Option<Hook<String, Vec<User>>>,
    tasks_for: Option<Hook<i32, Vec<Task>>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_list<F>(mut self, f: F) -> Self
    where
        F: Fn() -> StoreResult<Vec<User>> + Send + Sync + 'static,
    {
        self.list = Some(Box::new(move |()| f()));
        self
    }

    pub fn on_insert<F>(mut self, f: F) -> Self
    where
        F: Fn(NewUser) -> StoreResult<()> + Send + Sync + 'static,
    {
        self.insert = Some(Box::new(f));
        self
    }

    /// Replaces `create` entirely, bypassing the duplicate check
    pub fn on_create<F>(mut self, f: F) -> Self
    where
        F: Fn(NewUser) -> StoreResult<()> + Send + Sync + 'static,
    {
        self.create = Some(Box::new(f));
        self
    }

    pub fn on_get_by_id<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Option<User>> + Send + Sync + 'static,
    {
        self.get_by_id = Some(Box::new(f));
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: Fn(i32, NewUser) -> StoreResult<Option<User>> + Send + Sync + 'static,
    {
        self.update = Some(Box::new(move |(id, data)| f(id, data)));
        self
    }

    pub fn on_delete<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Option<i32>> + Send + Sync + 'static,
    {
        self.delete = Some(Box::new(f));
        self
    }

    pub fn on_search_by_email<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> StoreResult<Vec<User>> + Send + Sync + 'static,
    {
        self.search_by_email = Some(Box::new(f));
        self
    }

    pub fn on_search_by_name<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> StoreResult<Vec<User>> + Send + Sync + 'static,
    {
        self.search_by_name = Some(Box::new(f));
        self
    }

    pub fn on_tasks_for<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Vec<Task>> + Send + Sync + 'static,
    {
        self.tasks_for = Some(Box::new(f));
        self
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        self.list.as_ref().map_or(Ok(Vec::new()), |f| f(()))
    }

    async fn insert(&self, data: NewUser) -> StoreResult<()> {
        self.insert.as_ref().map_or(Ok(()), |f| f(data))
    }

    async fn create(&self, data: NewUser) -> StoreResult<()> {
        match &self.create {
            Some(f) => f(data),
            None => create_unique(self, data).await,
        }
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        self.get_by_id.as_ref().map_or(Ok(None), |f| f(id))
    }

    async fn update(&self, id: i32, data: NewUser) -> StoreResult<Option<User>> {
        self.update.as_ref().map_or(Ok(None), |f| f((id, data)))
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>> {
        self.delete.as_ref().map_or(Ok(None), |f| f(id))
    }

    async fn search_by_email(&self, email: &str) -> StoreResult<Vec<User>> {
        self.search_by_email
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(email.to_string()))
    }

    async fn search_by_name(&self, name: &str) -> StoreResult<Vec<User>> {
        self.search_by_name
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(name.to_string()))
    }

    async fn tasks_for(&self, user_id: i32) -> StoreResult<Vec<Task>> {
        self.tasks_for.as_ref().map_or(Ok(Vec::new()), |f| f(user_id))
    }
}

/// [`TaskStore`] double
#[derive(Default)]
pub struct MockTaskStore {
    list: Option<Hook<(), Vec<Task>>>,
    create: Option<Hook<NewTask, ()>>,
    get_by_id: Option<Hook<i32, Option<Task>>>,
    update: Option<Hook<(i32, NewTask), Option<Task>>>,
    delete: Option<Hook<i32, Option<i32>>>,
    search_by_title: Option<Hook<String, Vec<Task>>>,
    search_by_status: Option<Hook<Status, Vec<Task>>>,
    search_by_priority: Option<Hook<Priority, Vec<Task>>>,
    search_by_responsible_user: Option<Hook<i32, Vec<Task>>>,
    search_by_project: Option<Hook<i32, Vec<Task>>>,
}

impl MockTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_list<F>(mut self, f: F) -> Self
    where
        F: Fn() -> StoreResult<Vec<Task>> + Send + Sync + 'static,
    {
        self.list = Some(Box::new(move |()| f()));
        self
    }

    pub fn on_create<F>(mut self, f: F) -> Self
    where
        F: Fn(NewTask) -> StoreResult<()> + Send + Sync + 'static,
    {
        self.create = Some(Box::new(f));
        self
    }

    pub fn on_get_by_id<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Option<Task>> + Send + Sync + 'static,
    {
        self.get_by_id = Some(Box::new(f));
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: Fn(i32, NewTask) -> StoreResult<Option<Task>> + Send + Sync + 'static,
    {
        self.update = Some(Box::new(move |(id, data)| f(id, data)));
        self
    }

    pub fn on_delete<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Option<i32>> + Send + Sync + 'static,
    {
        self.delete = Some(Box::new(f));
        self
    }

    pub fn on_search_by_title<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> StoreResult<Vec<Task>> + Send + Sync + 'static,
    {
        self.search_by_title = Some(Box::new(f));
        self
    }

    pub fn on_search_by_status<F>(mut self, f: F) -> Self
    where
        F: Fn(Status) -> StoreResult<Vec<Task>> + Send + Sync + 'static,
    {
        self.search_by_status = Some(Box::new(f));
        self
    }

    pub fn on_search_by_priority<F>(mut self, f: F) -> Self
    where
        F: Fn(Priority) -> StoreResult<Vec<Task>> + Send + Sync + 'static,
    {
        self.search_by_priority = Some(Box::new(f));
        self
    }

    pub fn on_search_by_responsible_user<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Vec<Task>> + Send + Sync + 'static,
    {
        self.search_by_responsible_user = Some(Box::new(f));
        self
    }

    pub fn on_search_by_project<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Vec<Task>> + Send + Sync + 'static,
    {
        self.search_by_project = Some(Box::new(f));
        self
    }
}

#[async_trait]
impl TaskStore for MockTaskStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        self.list.as_ref().map_or(Ok(Vec::new()), |f| f(()))
    }

    async fn create(&self, data: NewTask) -> StoreResult<()> {
        self.create.as_ref().map_or(Ok(()), |f| f(data))
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Task>> {
        self.get_by_id.as_ref().map_or(Ok(None), |f| f(id))
    }

    async fn update(&self, id: i32, data: NewTask) -> StoreResult<Option<Task>> {
        self.update.as_ref().map_or(Ok(None), |f| f((id, data)))
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>> {
        self.delete.as_ref().map_or(Ok(None), |f| f(id))
    }

    async fn search_by_title(&self, title: &str) -> StoreResult<Vec<Task>> {
        self.search_by_title
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(title.to_string()))
    }

    async fn search_by_status(&self, status: Status) -> StoreResult<Vec<Task>> {
        self.search_by_status
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(status))
    }

    async fn search_by_priority(&self, priority: Priority) -> StoreResult<Vec<Task>> {
        self.search_by_priority
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(priority))
    }

    async fn search_by_responsible_user(&self, user_id: i32) -> StoreResult<Vec<Task>> {
        self.search_by_responsible_user
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(user_id))
    }

    async fn search_by_project(&self, project_id: i32) -> StoreResult<Vec<Task>> {
        self.search_by_project
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(project_id))
    }
}

/// [`ProjectStore`] double
#[derive(Default)]
pub struct MockProjectStore {
    list: Option<Hook<(), Vec<Project>>>,
    create: Option<Hook<NewProject, ()>>,
    get_by_id: Option<Hook<i32, Option<Project>>>,
    update: Option<Hook<(i32, NewProject), Option<Project>>>,
    delete: Option<Hook<i32, Option<i32>>>,
    search_by_title: Option<Hook<String, Vec<Project>>>,
    search_by_manager: Option<Hook<i32, Vec<Project>>>,
    tasks_for: Option<Hook<i32, Vec<Task>>>,
}

impl MockProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_list<F>(mut self, f: F) -> Self
    where
        F: Fn() -> StoreResult<Vec<Project>> + Send + Sync + 'static,
    {
        self.list = Some(Box::new(move |()| f()));
        self
    }

    pub fn on_create<F>(mut self, f: F) -> Self
    where
        F: Fn(NewProject) -> StoreResult<()> + Send + Sync + 'static,
    {
        self.create = Some(Box::new(f));
        self
    }

    pub fn on_get_by_id<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Option<Project>> + Send + Sync + 'static,
    {
        self.get_by_id = Some(Box::new(f));
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: Fn(i32, NewProject) -> StoreResult<Option<Project>> + Send + Sync + 'static,
    {
        self.update = Some(Box::new(move |(id, data)| f(id, data)));
        self
    }

    pub fn on_delete<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Option<i32>> + Send + Sync + 'static,
    {
        self.delete = Some(Box::new(f));
        self
    }

    pub fn on_search_by_title<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> StoreResult<Vec<Project>> + Send + Sync + 'static,
    {
        self.search_by_title = Some(Box::new(f));
        self
    }

    pub fn on_search_by_manager<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Vec<Project>> + Send + Sync + 'static,
    {
        self.search_by_manager = Some(Box::new(f));
        self
    }

    pub fn on_tasks_for<F>(mut self, f: F) -> Self
    where
        F: Fn(i32) -> StoreResult<Vec<Task>> + Send + Sync + 'static,
    {
        self.tasks_for = Some(Box::new(f));
        self
    }
}

#[async_trait]
impl ProjectStore for MockProjectStore {
    async fn list(&self) -> StoreResult<Vec<Project>> {
        self.list.as_ref().map_or(Ok(Vec::new()), |f| f(()))
    }

    async fn create(&self, data: NewProject) -> StoreResult<()> {
        self.create.as_ref().map_or(Ok(()), |f| f(data))
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Project>> {
        self.get_by_id.as_ref().map_or(Ok(None), |f| f(id))
    }

    async fn update(&self, id: i32, data: NewProject) -> StoreResult<Option<Project>> {
        self.update.as_ref().map_or(Ok(None), |f| f((id, data)))
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<i32>> {
        self.delete.as_ref().map_or(Ok(None), |f| f(id))
    }

    async fn search_by_title(&self, title: &str) -> StoreResult<Vec<Project>> {
        self.search_by_title
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(title.to_string()))
    }

    async fn search_by_manager(&self, manager_id: i32) -> StoreResult<Vec<Project>> {
        self.search_by_manager
            .as_ref()
            .map_or(Ok(Vec::new()), |f| f(manager_id))
    }

    async fn tasks_for(&self, project_id: i32) -> StoreResult<Vec<Task>> {
        self.tasks_for.as_ref().map_or(Ok(Vec::new()), |f| f(project_id))
    }
}
