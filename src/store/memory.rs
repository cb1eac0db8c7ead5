use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use super::{
    CommentStore, ProjectStore, RoleStore, StatsStore, StoreError, StoreResult, TaskListStore,
    TaskStore, UserStore,
};
use crate::models::{
    comment::{Comment, CommentDetail, NewComment},
    project::{NewProject, Project, ProjectChanges, ProjectDetail, ProjectSummary, ProjectTaskList},
    role::{Role, DEFAULT_ROLE},
    stats::{sort_buckets, ChartBucket, Charts, Stats},
    task::{NewTask, Task, TaskChanges, TaskFilter, TaskItem, TaskSummary},
    task_list::{NewTaskList, TaskList, TaskListChanges, TaskListSummary},
    user::{NewUser, User, UserChanges, UserRecord, UserSummary},
};

/// In-process store with the same constraints as the MySQL schema:
/// unique user names, emails and role names, checked foreign keys, and the
/// same cascade / restrict behaviour on delete.
///
/// Starts with the `Admin` and `User` roles, like a freshly migrated database.
#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for role_name in ["Admin", DEFAULT_ROLE] {
            let role_id = tables.allocate("roles");
            tables.roles.insert(
                role_id,
                Role {
                    role_id,
                    role_name: role_name.to_string(),
                },
            );
        }
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    fn tables(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Corrupt("memory store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct ProjectRow {
    project_id: i32,
    project_name: String,
    description: Option<String>,
    created_by: i32,
    created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
struct ListRow {
    list_id: i32,
    list_name: String,
    project_id: i32,
}

#[derive(Debug, Clone)]
struct CommentRow {
    comment_id: i32,
    task_id: i32,
    user_id: i32,
    comment_text: String,
    created_at: NaiveDateTime,
}

#[derive(Default)]
struct Tables {
    last_ids: HashMap<&'static str, i32>,
    users: BTreeMap<i32, UserRecord>,
    roles: BTreeMap<i32, Role>,
    /// (user_id, role_id)
    user_roles: BTreeSet<(i32, i32)>,
    projects: BTreeMap<i32, ProjectRow>,
    task_lists: BTreeMap<i32, ListRow>,
    tasks: BTreeMap<i32, TaskItem>,
    comments: BTreeMap<i32, CommentRow>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn missing_reference(what: &str, id: i32) -> StoreError {
    StoreError::InvalidReference(format!("{what} {id} does not exist"))
}

impl Tables {
    /// Ids are never reused, like AUTO_INCREMENT.
    fn allocate(&mut self, table: &'static str) -> i32 {
        let id = self.last_ids.entry(table).or_insert(0);
        *id += 1;
        *id
    }

    fn user_record(&self, id: i32) -> StoreResult<&UserRecord> {
        self.users
            .get(&id)
            .ok_or(StoreError::NotFound { entity: "User", id })
    }

    fn user_view(&self, record: &UserRecord) -> User {
        let mut roles: Vec<String> = self
            .user_roles
            .iter()
            .filter(|(user_id, _)| *user_id == record.user_id)
            .filter_map(|(_, role_id)| self.roles.get(role_id))
            .map(|role| role.role_name.clone())
            .collect();
        roles.sort();
        record.clone().into_user(roles)
    }

    fn user_summary(&self, id: i32) -> StoreResult<UserSummary> {
        Ok(self.user_record(id)?.summary())
    }

    fn check_user_unique(&self, user_name: &str, email: &str, except: Option<i32>) -> StoreResult<()> {
        let taken = self.users.values().any(|user| {
            Some(user.user_id) != except && (user.user_name == user_name || user.email == email)
        });
        if taken {
            return Err(StoreError::Conflict(
                "A record with the same unique value already exists".into(),
            ));
        }
        Ok(())
    }

    fn check_role_exists(&self, role_id: i32) -> StoreResult<()> {
        if !self.roles.contains_key(&role_id) {
            return Err(missing_reference("Role", role_id));
        }
        Ok(())
    }

    fn check_user_exists(&self, user_id: i32) -> StoreResult<()> {
        if !self.users.contains_key(&user_id) {
            return Err(missing_reference("User", user_id));
        }
        Ok(())
    }

    fn project_view(&self, row: &ProjectRow) -> StoreResult<Project> {
        Ok(Project {
            project_id: row.project_id,
            project_name: row.project_name.clone(),
            description: row.description.clone(),
            created_by: row.created_by,
            created_at: row.created_at,
            creator: self.user_summary(row.created_by)?,
        })
    }

    fn project(&self, id: i32) -> StoreResult<Project> {
        let row = self
            .projects
            .get(&id)
            .ok_or(StoreError::NotFound { entity: "Project", id })?;
        self.project_view(row)
    }

    fn list_view(&self, row: &ListRow) -> StoreResult<TaskList> {
        let project = self
            .projects
            .get(&row.project_id)
            .ok_or_else(|| missing_reference("Project", row.project_id))?;
        Ok(TaskList {
            list_id: row.list_id,
            list_name: row.list_name.clone(),
            project_id: row.project_id,
            project: ProjectSummary {
                project_id: project.project_id,
                project_name: project.project_name.clone(),
            },
        })
    }

    fn task_list(&self, id: i32) -> StoreResult<TaskList> {
        let row = self
            .task_lists
            .get(&id)
            .ok_or(StoreError::NotFound { entity: "Task list", id })?;
        self.list_view(row)
    }

    fn task_view(&self, item: &TaskItem) -> StoreResult<Task> {
        let list = self
            .task_lists
            .get(&item.list_id)
            .ok_or_else(|| missing_reference("Task list", item.list_id))?;
        let assignee = match item.assigned_to {
            Some(user_id) => Some(self.user_summary(user_id)?),
            None => None,
        };
        Ok(Task {
            item: item.clone(),
            task_list: TaskListSummary {
                list_id: list.list_id,
                list_name: list.list_name.clone(),
                project_id: list.project_id,
            },
            assignee,
        })
    }

    fn task(&self, id: i32) -> StoreResult<Task> {
        let item = self
            .tasks
            .get(&id)
            .ok_or(StoreError::NotFound { entity: "Task", id })?;
        self.task_view(item)
    }

    fn comment_view(&self, row: &CommentRow) -> StoreResult<Comment> {
        Ok(Comment {
            comment_id: row.comment_id,
            task_id: row.task_id,
            user_id: row.user_id,
            comment_text: row.comment_text.clone(),
            created_at: row.created_at,
            author: self.user_summary(row.user_id)?,
        })
    }

    fn comment_row(&self, id: i32) -> StoreResult<&CommentRow> {
        self.comments
            .get(&id)
            .ok_or(StoreError::NotFound { entity: "Comment", id })
    }

    fn remove_tasks_where<F>(&mut self, predicate: F)
    where
        F: Fn(&TaskItem) -> bool,
    {
        let doomed: BTreeSet<i32> = self
            .tasks
            .values()
            .filter(|task| predicate(task))
            .map(|task| task.task_id)
            .collect();
        self.tasks.retain(|id, _| !doomed.contains(id));
        self.comments.retain(|_, comment| !doomed.contains(&comment.task_id));
    }

    fn remove_lists_where<F>(&mut self, predicate: F)
    where
        F: Fn(&ListRow) -> bool,
    {
        let doomed: BTreeSet<i32> = self
            .task_lists
            .values()
            .filter(|list| predicate(list))
            .map(|list| list.list_id)
            .collect();
        self.task_lists.retain(|id, _| !doomed.contains(id));
        self.remove_tasks_where(|task| doomed.contains(&task.list_id));
    }

    fn task_buckets<F>(&self, key: F) -> Vec<ChartBucket>
    where
        F: Fn(&TaskItem) -> &'static str,
    {
        let mut counts: BTreeMap<&'static str, i64> = BTreeMap::new();
        for task in self.tasks.values() {
            *counts.entry(key(task)).or_default() += 1;
        }
        let mut buckets: Vec<ChartBucket> = counts
            .into_iter()
            .map(|(name, value)| ChartBucket {
                name: name.to_string(),
                value,
            })
            .collect();
        sort_buckets(&mut buckets);
        buckets
    }
}

/// Newest first; equal timestamps fall back to the higher id.
fn newest_first(a: (NaiveDateTime, i32), b: (NaiveDateTime, i32)) -> std::cmp::Ordering {
    b.cmp(&a)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let tables = self.tables()?;
        let mut records: Vec<&UserRecord> = tables.users.values().collect();
        records.sort_by(|a, b| newest_first((a.created_at, a.user_id), (b.created_at, b.user_id)));
        Ok(records.into_iter().map(|record| tables.user_view(record)).collect())
    }

    async fn get_user(&self, id: i32) -> StoreResult<User> {
        let tables = self.tables()?;
        let record = tables.user_record(id)?;
        Ok(tables.user_view(record))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let tables = self.tables()?;
        Ok(tables.users.values().find(|user| user.email == email).cloned())
    }

    async fn user_exists(&self, user_name: &str, email: &str) -> StoreResult<bool> {
        let tables = self.tables()?;
        Ok(tables
            .users
            .values()
            .any(|user| user.user_name == user_name || user.email == email))
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables()?;
        tables.check_user_unique(&user.user_name, &user.email, None)?;
        if let Some(role_id) = user.role_id {
            tables.check_role_exists(role_id)?;
        }

        let user_id = tables.allocate("users");
        let record = UserRecord {
            user_id,
            user_name: user.user_name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now(),
        };
        tables.users.insert(user_id, record.clone());
        if let Some(role_id) = user.role_id {
            tables.user_roles.insert((user_id, role_id));
        }

        Ok(tables.user_view(&record))
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> StoreResult<User> {
        let mut tables = self.tables()?;
        let mut record = tables.user_record(id)?.clone();

        if let Some(user_name) = changes.user_name {
            record.user_name = user_name;
        }
        if let Some(email) = changes.email {
            record.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            record.password_hash = password_hash;
        }
        tables.check_user_unique(&record.user_name, &record.email, Some(id))?;
        if let Some(role_id) = changes.role_id {
            tables.check_role_exists(role_id)?;
        }

        tables.users.insert(id, record.clone());
        if let Some(role_id) = changes.role_id {
            tables.user_roles.retain(|(user_id, _)| *user_id != id);
            tables.user_roles.insert((id, role_id));
        }

        Ok(tables.user_view(&record))
    }

    async fn delete_user(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables()?;
        tables.user_record(id)?;
        if tables.projects.values().any(|project| project.created_by == id) {
            return Err(StoreError::Conflict(
                "The record is still referenced by other records".into(),
            ));
        }

        tables.users.remove(&id);
        tables.user_roles.retain(|(user_id, _)| *user_id != id);
        tables.comments.retain(|_, comment| comment.user_id != id);
        for task in tables.tasks.values_mut() {
            if task.assigned_to == Some(id) {
                task.assigned_to = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        Ok(self.tables()?.roles.values().cloned().collect())
    }

    async fn get_role(&self, id: i32) -> StoreResult<Role> {
        self.tables()?
            .roles
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "Role", id })
    }

    async fn find_role_by_name(&self, role_name: &str) -> StoreResult<Option<Role>> {
        Ok(self
            .tables()?
            .roles
            .values()
            .find(|role| role.role_name == role_name)
            .cloned())
    }

    async fn create_role(&self, role_name: String) -> StoreResult<Role> {
        let mut tables = self.tables()?;
        if tables.roles.values().any(|role| role.role_name == role_name) {
            return Err(StoreError::Conflict(
                "A record with the same unique value already exists".into(),
            ));
        }

        let role_id = tables.allocate("roles");
        let role = Role { role_id, role_name };
        tables.roles.insert(role_id, role.clone());
        Ok(role)
    }

    async fn update_role(&self, id: i32, role_name: Option<String>) -> StoreResult<Role> {
        let mut tables = self.tables()?;
        if !tables.roles.contains_key(&id) {
            return Err(StoreError::NotFound { entity: "Role", id });
        }

        if let Some(role_name) = role_name {
            if tables
                .roles
                .values()
                .any(|role| role.role_id != id && role.role_name == role_name)
            {
                return Err(StoreError::Conflict(
                    "A record with the same unique value already exists".into(),
                ));
            }
            if let Some(role) = tables.roles.get_mut(&id) {
                role.role_name = role_name;
            }
        }

        tables
            .roles
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "Role", id })
    }

    async fn delete_role(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if tables.roles.remove(&id).is_none() {
            return Err(StoreError::NotFound { entity: "Role", id });
        }
        tables.user_roles.retain(|(_, role_id)| *role_id != id);
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list_projects(&self, created_by: Option<i32>) -> StoreResult<Vec<Project>> {
        let tables = self.tables()?;
        let mut rows: Vec<&ProjectRow> = tables
            .projects
            .values()
            .filter(|row| created_by.map_or(true, |user_id| row.created_by == user_id))
            .collect();
        rows.sort_by(|a, b| {
            newest_first((a.created_at, a.project_id), (b.created_at, b.project_id))
        });
        rows.into_iter().map(|row| tables.project_view(row)).collect()
    }

    async fn get_project(&self, id: i32) -> StoreResult<ProjectDetail> {
        let tables = self.tables()?;
        let project = tables.project(id)?;

        let task_lists = tables
            .task_lists
            .values()
            .filter(|list| list.project_id == id)
            .map(|list| {
                let mut tasks: Vec<TaskItem> = tables
                    .tasks
                    .values()
                    .filter(|task| task.list_id == list.list_id)
                    .cloned()
                    .collect();
                tasks.sort_by(|a, b| {
                    newest_first((a.created_at, a.task_id), (b.created_at, b.task_id))
                });
                ProjectTaskList {
                    list_id: list.list_id,
                    list_name: list.list_name.clone(),
                    tasks,
                }
            })
            .collect();

        Ok(ProjectDetail {
            project,
            task_lists,
        })
    }

    async fn create_project(&self, project: NewProject) -> StoreResult<Project> {
        let mut tables = self.tables()?;
        tables.check_user_exists(project.created_by)?;

        let project_id = tables.allocate("projects");
        tables.projects.insert(
            project_id,
            ProjectRow {
                project_id,
                project_name: project.project_name,
                description: project.description,
                created_by: project.created_by,
                created_at: now(),
            },
        );
        tables.project(project_id)
    }

    async fn update_project(&self, id: i32, changes: ProjectChanges) -> StoreResult<Project> {
        let mut tables = self.tables()?;
        let row = tables
            .projects
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Project", id })?;

        if let Some(project_name) = changes.project_name {
            row.project_name = project_name;
        }
        if let Some(description) = changes.description {
            row.description = Some(description);
        }
        tables.project(id)
    }

    async fn delete_project(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if tables.projects.remove(&id).is_none() {
            return Err(StoreError::NotFound { entity: "Project", id });
        }
        tables.remove_lists_where(|list| list.project_id == id);
        Ok(())
    }
}

#[async_trait]
impl TaskListStore for MemoryStore {
    async fn list_task_lists(&self, project_id: Option<i32>) -> StoreResult<Vec<TaskList>> {
        let tables = self.tables()?;
        tables
            .task_lists
            .values()
            .filter(|list| project_id.map_or(true, |id| list.project_id == id))
            .map(|list| tables.list_view(list))
            .collect()
    }

    async fn get_task_list(&self, id: i32) -> StoreResult<TaskList> {
        self.tables()?.task_list(id)
    }

    async fn create_task_list(&self, list: NewTaskList) -> StoreResult<TaskList> {
        let mut tables = self.tables()?;
        if !tables.projects.contains_key(&list.project_id) {
            return Err(missing_reference("Project", list.project_id));
        }

        let list_id = tables.allocate("task_lists");
        tables.task_lists.insert(
            list_id,
            ListRow {
                list_id,
                list_name: list.list_name,
                project_id: list.project_id,
            },
        );
        tables.task_list(list_id)
    }

    async fn update_task_list(&self, id: i32, changes: TaskListChanges) -> StoreResult<TaskList> {
        let mut tables = self.tables()?;
        if !tables.task_lists.contains_key(&id) {
            return Err(StoreError::NotFound { entity: "Task list", id });
        }
        if let Some(project_id) = changes.project_id {
            if !tables.projects.contains_key(&project_id) {
                return Err(missing_reference("Project", project_id));
            }
        }

        if let Some(row) = tables.task_lists.get_mut(&id) {
            if let Some(list_name) = changes.list_name {
                row.list_name = list_name;
            }
            if let Some(project_id) = changes.project_id {
                row.project_id = project_id;
            }
        }
        tables.task_list(id)
    }

    async fn delete_task_list(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if !tables.task_lists.contains_key(&id) {
            return Err(StoreError::NotFound { entity: "Task list", id });
        }
        tables.remove_lists_where(|list| list.list_id == id);
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        let tables = self.tables()?;
        let mut items: Vec<&TaskItem> = tables
            .tasks
            .values()
            .filter(|task| filter.list_id.map_or(true, |id| task.list_id == id))
            .filter(|task| {
                filter.project_id.map_or(true, |project_id| {
                    tables
                        .task_lists
                        .get(&task.list_id)
                        .is_some_and(|list| list.project_id == project_id)
                })
            })
            .collect();
        items.sort_by(|a, b| newest_first((a.created_at, a.task_id), (b.created_at, b.task_id)));
        items.into_iter().map(|item| tables.task_view(item)).collect()
    }

    async fn get_task(&self, id: i32) -> StoreResult<Task> {
        self.tables()?.task(id)
    }

    async fn create_task(&self, task: NewTask) -> StoreResult<Task> {
        let mut tables = self.tables()?;
        if !tables.task_lists.contains_key(&task.list_id) {
            return Err(missing_reference("Task list", task.list_id));
        }
        if let Some(user_id) = task.assigned_to {
            tables.check_user_exists(user_id)?;
        }

        let task_id = tables.allocate("tasks");
        tables.tasks.insert(
            task_id,
            TaskItem {
                task_id,
                list_id: task.list_id,
                assigned_to: task.assigned_to,
                title: task.title,
                description: task.description,
                status: task.status,
                priority: task.priority,
                due_date: task.due_date,
                created_at: now(),
            },
        );
        tables.task(task_id)
    }

    async fn update_task(&self, id: i32, changes: TaskChanges) -> StoreResult<Task> {
        let mut tables = self.tables()?;
        let mut item = tables
            .tasks
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "Task", id })?;

        if let Some(list_id) = changes.list_id {
            if !tables.task_lists.contains_key(&list_id) {
                return Err(missing_reference("Task list", list_id));
            }
            item.list_id = list_id;
        }
        if let Some(user_id) = changes.assigned_to {
            tables.check_user_exists(user_id)?;
            item.assigned_to = Some(user_id);
        }
        if let Some(title) = changes.title {
            item.title = title;
        }
        if let Some(description) = changes.description {
            item.description = Some(description);
        }
        if let Some(status) = changes.status {
            item.status = status;
        }
        if let Some(priority) = changes.priority {
            item.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            item.due_date = Some(due_date);
        }

        tables.tasks.insert(id, item);
        tables.task(id)
    }

    async fn delete_task(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if !tables.tasks.contains_key(&id) {
            return Err(StoreError::NotFound { entity: "Task", id });
        }
        tables.remove_tasks_where(|task| task.task_id == id);
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn list_comments(&self, task_id: Option<i32>) -> StoreResult<Vec<Comment>> {
        let tables = self.tables()?;
        let mut rows: Vec<&CommentRow> = tables
            .comments
            .values()
            .filter(|comment| task_id.map_or(true, |id| comment.task_id == id))
            .collect();
        rows.sort_by_key(|comment| (comment.created_at, comment.comment_id));
        rows.into_iter().map(|row| tables.comment_view(row)).collect()
    }

    async fn get_comment(&self, id: i32) -> StoreResult<CommentDetail> {
        let tables = self.tables()?;
        let row = tables.comment_row(id)?;
        let task = tables
            .tasks
            .get(&row.task_id)
            .ok_or_else(|| missing_reference("Task", row.task_id))?;
        Ok(CommentDetail {
            comment: tables.comment_view(row)?,
            task: TaskSummary {
                task_id: task.task_id,
                title: task.title.clone(),
            },
        })
    }

    async fn create_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let mut tables = self.tables()?;
        if !tables.tasks.contains_key(&comment.task_id) {
            return Err(missing_reference("Task", comment.task_id));
        }
        tables.check_user_exists(comment.user_id)?;

        let comment_id = tables.allocate("comments");
        let row = CommentRow {
            comment_id,
            task_id: comment.task_id,
            user_id: comment.user_id,
            comment_text: comment.comment_text,
            created_at: now(),
        };
        tables.comments.insert(comment_id, row.clone());
        tables.comment_view(&row)
    }

    async fn update_comment(&self, id: i32, comment_text: String) -> StoreResult<Comment> {
        let mut tables = self.tables()?;
        let row = tables
            .comments
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Comment", id })?;
        row.comment_text = comment_text;
        let row = row.clone();
        tables.comment_view(&row)
    }

    async fn delete_comment(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if tables.comments.remove(&id).is_none() {
            return Err(StoreError::NotFound { entity: "Comment", id });
        }
        Ok(())
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn stats(&self) -> StoreResult<Stats> {
        let tables = self.tables()?;
        Ok(Stats {
            users: tables.users.len() as i64,
            projects: tables.projects.len() as i64,
            task_lists: tables.task_lists.len() as i64,
            tasks: tables.tasks.len() as i64,
            roles: tables.roles.len() as i64,
            charts: Charts {
                tasks_by_status: tables.task_buckets(|task| task.status.as_str()),
                tasks_by_priority: tables.task_buckets(|task| task.priority.as_str()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{TaskPriority, TaskStatus};

    async fn user(store: &MemoryStore, name: &str, role_id: Option<i32>) -> User {
        store
            .create_user(NewUser {
                user_name: name.to_string(),
                email: format!("{name}@example.com"),
                password_hash: "hash".into(),
                role_id,
            })
            .await
            .unwrap()
    }

    async fn project_with_task(store: &MemoryStore, owner: i32) -> (Project, TaskList, Task) {
        let project = store
            .create_project(NewProject {
                project_name: "Website Redesign".into(),
                description: None,
                created_by: owner,
            })
            .await
            .unwrap();
        let list = store
            .create_task_list(NewTaskList {
                list_name: "Backlog".into(),
                project_id: project.project_id,
            })
            .await
            .unwrap();
        let task = store
            .create_task(NewTask {
                list_id: list.list_id,
                assigned_to: Some(owner),
                title: "Design home page".into(),
                description: None,
                status: TaskStatus::Pending,
                priority: TaskPriority::High,
                due_date: None,
            })
            .await
            .unwrap();
        (project, list, task)
    }

    #[tokio::test]
    async fn starts_with_default_roles() {
        let store = MemoryStore::new();
        let names: Vec<String> = store
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .map(|role| role.role_name)
            .collect();
        assert_eq!(names, vec!["Admin", "User"]);
    }

    #[tokio::test]
    async fn duplicate_user_name_or_email_conflicts() {
        let store = MemoryStore::new();
        user(&store, "alice", None).await;

        let err = store
            .create_user(NewUser {
                user_name: "alice".into(),
                email: "other@example.com".into(),
                password_hash: "hash".into(),
                role_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert!(store.user_exists("nobody", "alice@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn role_change_replaces_all_assignments() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice", Some(1)).await;
        assert_eq!(alice.roles, vec!["Admin"]);

        let updated = store
            .update_user(
                alice.user_id,
                UserChanges {
                    role_id: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.roles, vec!["User"]);
        assert_eq!(updated.user_name, "alice");
    }

    #[tokio::test]
    async fn unknown_role_on_update_leaves_roles_untouched() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice", Some(1)).await;

        let err = store
            .update_user(
                alice.user_id,
                UserChanges {
                    role_id: Some(99),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));
        assert_eq!(store.get_user(alice.user_id).await.unwrap().roles, vec!["Admin"]);
    }

    #[tokio::test]
    async fn deleting_a_project_cascades_to_lists_tasks_and_comments() {
        let store = MemoryStore::new();
        let owner = user(&store, "alice", None).await;
        let (project, list, task) = project_with_task(&store, owner.user_id).await;
        let comment = store
            .create_comment(NewComment {
                task_id: task.item.task_id,
                user_id: owner.user_id,
                comment_text: "Looks good".into(),
            })
            .await
            .unwrap();

        store.delete_project(project.project_id).await.unwrap();

        assert!(matches!(
            store.get_task_list(list.list_id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.get_task(task.item.task_id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.get_comment(comment.comment_id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn deleting_a_project_owner_is_blocked() {
        let store = MemoryStore::new();
        let owner = user(&store, "alice", None).await;
        project_with_task(&store, owner.user_id).await;

        let err = store.delete_user(owner.user_id).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn deleting_an_assignee_unassigns_their_tasks() {
        let store = MemoryStore::new();
        let owner = user(&store, "alice", None).await;
        let bob = user(&store, "bob", None).await;
        let (_, _, task) = project_with_task(&store, owner.user_id).await;
        store
            .update_task(
                task.item.task_id,
                TaskChanges {
                    assigned_to: Some(bob.user_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        store.delete_user(bob.user_id).await.unwrap();

        let task = store.get_task(task.item.task_id).await.unwrap();
        assert_eq!(task.item.assigned_to, None);
        assert!(task.assignee.is_none());
    }

    #[tokio::test]
    async fn dangling_references_are_rejected() {
        let store = MemoryStore::new();
        let err = store
            .create_task(NewTask {
                list_id: 42,
                assigned_to: None,
                title: "Orphan".into(),
                description: None,
                status: TaskStatus::default(),
                priority: TaskPriority::default(),
                due_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));
        assert!(store.list_tasks(TaskFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tasks_filter_by_project_through_their_list() {
        let store = MemoryStore::new();
        let owner = user(&store, "alice", None).await;
        let (project, _, task) = project_with_task(&store, owner.user_id).await;
        project_with_task(&store, owner.user_id).await;

        let filtered = store
            .list_tasks(TaskFilter {
                list_id: None,
                project_id: Some(project.project_id),
            })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].item.task_id, task.item.task_id);
        assert_eq!(store.list_tasks(TaskFilter::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let role = store.create_role("Manager".into()).await.unwrap();
        store.delete_role(role.role_id).await.unwrap();
        let next = store.create_role("Reviewer".into()).await.unwrap();
        assert!(next.role_id > role.role_id);
    }

    #[tokio::test]
    async fn stats_count_tasks_by_status_and_priority() {
        let store = MemoryStore::new();
        let owner = user(&store, "alice", None).await;
        project_with_task(&store, owner.user_id).await;
        project_with_task(&store, owner.user_id).await;

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.users, 1);
        assert_eq!(stats.projects, 2);
        assert_eq!(stats.task_lists, 2);
        assert_eq!(stats.tasks, 2);
        assert_eq!(stats.roles, 2);
        assert_eq!(
            stats.charts.tasks_by_priority,
            vec![ChartBucket {
                name: "High".into(),
                value: 2
            }]
        );
        assert_eq!(stats.charts.tasks_by_status[0].name, "Pending");
    }
}
