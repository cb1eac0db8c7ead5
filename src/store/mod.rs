//! Persistence boundary for the admin API.
//!
//! Handlers only talk to [`Store`]. [`MySqlStore`] is the production backend.
//! `MemoryStore` exists in test builds only: it keeps everything in process
//! with the same referential behaviour and backs the HTTP tests.

use async_trait::async_trait;

use crate::models::{
    comment::{Comment, CommentDetail, NewComment},
    project::{NewProject, Project, ProjectChanges, ProjectDetail},
    role::Role,
    stats::Stats,
    task::{NewTask, Task, TaskChanges, TaskFilter},
    task_list::{NewTaskList, TaskList, TaskListChanges},
    user::{NewUser, User, UserChanges, UserRecord},
};

#[cfg(test)]
pub mod memory;
pub mod mysql;

#[cfg(test)]
pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A unique value is already taken, or the row is still referenced.
    #[error("{0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("{0}")]
    InvalidReference(String),

    #[error("stored value is invalid: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Newest first.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn get_user(&self, id: i32) -> StoreResult<User>;

    /// Includes the password hash; only the login path should need this.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Whether any user already has this user name or this email.
    async fn user_exists(&self, user_name: &str, email: &str) -> StoreResult<bool>;

    /// Creates the user and, when given, its role assignment atomically.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    /// Applies the provided fields. A role change replaces all assignments
    /// within the same transaction as the field update.
    async fn update_user(&self, id: i32, changes: UserChanges) -> StoreResult<User>;

    async fn delete_user(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn list_roles(&self) -> StoreResult<Vec<Role>>;
    async fn get_role(&self, id: i32) -> StoreResult<Role>;
    async fn find_role_by_name(&self, role_name: &str) -> StoreResult<Option<Role>>;
    async fn create_role(&self, role_name: String) -> StoreResult<Role>;
    async fn update_role(&self, id: i32, role_name: Option<String>) -> StoreResult<Role>;
    async fn delete_role(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Newest first, optionally only those created by `created_by`.
    async fn list_projects(&self, created_by: Option<i32>) -> StoreResult<Vec<Project>>;
    async fn get_project(&self, id: i32) -> StoreResult<ProjectDetail>;
    async fn create_project(&self, project: NewProject) -> StoreResult<Project>;
    async fn update_project(&self, id: i32, changes: ProjectChanges) -> StoreResult<Project>;
    /// Cascades to task lists, their tasks and the tasks' comments.
    async fn delete_project(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait TaskListStore: Send + Sync {
    async fn list_task_lists(&self, project_id: Option<i32>) -> StoreResult<Vec<TaskList>>;
    async fn get_task_list(&self, id: i32) -> StoreResult<TaskList>;
    async fn create_task_list(&self, list: NewTaskList) -> StoreResult<TaskList>;
    async fn update_task_list(&self, id: i32, changes: TaskListChanges) -> StoreResult<TaskList>;
    async fn delete_task_list(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Newest first.
    async fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>>;
    async fn get_task(&self, id: i32) -> StoreResult<Task>;
    async fn create_task(&self, task: NewTask) -> StoreResult<Task>;
    async fn update_task(&self, id: i32, changes: TaskChanges) -> StoreResult<Task>;
    async fn delete_task(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Oldest first, so a task's thread reads top to bottom.
    async fn list_comments(&self, task_id: Option<i32>) -> StoreResult<Vec<Comment>>;
    async fn get_comment(&self, id: i32) -> StoreResult<CommentDetail>;
    async fn create_comment(&self, comment: NewComment) -> StoreResult<Comment>;
    async fn update_comment(&self, id: i32, comment_text: String) -> StoreResult<Comment>;
    async fn delete_comment(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn stats(&self) -> StoreResult<Stats>;
}

/// Everything the HTTP layer needs from persistence.
pub trait Store:
    UserStore + RoleStore + ProjectStore + TaskListStore + TaskStore + CommentStore + StatsStore
{
}

impl<T> Store for T where
    T: UserStore + RoleStore + ProjectStore + TaskListStore + TaskStore + CommentStore + StatsStore
{
}
