/// Entity types and their SQL
///
/// - `user`: registered users
/// - `task`: tasks with priority/status enums
/// - `project`: projects owning tasks
///
/// Each model exposes associated `async fn`s taking a `&PgPool`. Handlers do
/// not call these directly; they go through the accessor traits in
/// [`crate::store`].

pub mod project;
pub mod task;
pub mod user;

pub use project::{NewProject, Project};
pub use task::{NewTask, ParseEnumError, Priority, Status, Task};
pub use user::{NewUser, User};
