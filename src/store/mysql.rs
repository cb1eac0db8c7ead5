use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use sqlx::mysql::{MySql, MySqlDatabaseError, MySqlPool, MySqlPoolOptions, MySqlQueryResult};
use sqlx::{Encode, FromRow, QueryBuilder, Type};

use super::{
    CommentStore, ProjectStore, RoleStore, StatsStore, StoreError, StoreResult, TaskListStore,
    TaskStore, UserStore,
};
use crate::models::{
    comment::{Comment, CommentDetail, NewComment},
    project::{NewProject, Project, ProjectChanges, ProjectDetail, ProjectSummary, ProjectTaskList},
    role::Role,
    stats::{sort_buckets, ChartBucket, Charts, Stats},
    task::{NewTask, Task, TaskChanges, TaskFilter, TaskItem, TaskSummary, UnknownVariant},
    task_list::{NewTaskList, TaskList, TaskListChanges, TaskListSummary},
    user::{NewUser, User, UserChanges, UserRecord, UserSummary},
};

const ER_DUP_ENTRY: u16 = 1062;
const ER_ROW_IS_REFERENCED_2: u16 = 1451;
const ER_NO_REFERENCED_ROW_2: u16 = 1452;

const USER_SELECT: &str = "SELECT user_id, user_name, email, password_hash, created_at FROM Users_";

const USER_ROLE_SELECT: &str = "
    SELECT ur.user_id, r.role_name
    FROM UserRoles_ ur
    JOIN Roles_ r ON r.role_id = ur.role_id";

const PROJECT_SELECT: &str = "
    SELECT p.project_id, p.project_name, p.description, p.created_by, p.created_at,
           u.user_name AS creator_name, u.email AS creator_email
    FROM Projects_ p
    JOIN Users_ u ON u.user_id = p.created_by";

const TASK_LIST_SELECT: &str = "
    SELECT l.list_id, l.list_name, l.project_id, p.project_name
    FROM TaskLists_ l
    JOIN Projects_ p ON p.project_id = l.project_id";

const TASK_SELECT: &str = "
    SELECT t.task_id, t.list_id, t.assigned_to, t.title, t.description, t.status, t.priority,
           t.due_date, t.created_at, l.list_name, l.project_id,
           u.user_name AS assignee_name, u.email AS assignee_email
    FROM Tasks_ t
    JOIN TaskLists_ l ON l.list_id = t.list_id
    LEFT JOIN Users_ u ON u.user_id = t.assigned_to";

const COMMENT_SELECT: &str = "
    SELECT c.comment_id, c.task_id, c.user_id, c.comment_text, c.created_at,
           u.user_name AS author_name, u.email AS author_email, t.title AS task_title
    FROM TaskComments_ c
    JOIN Users_ u ON u.user_id = c.user_id
    JOIN Tasks_ t ON t.task_id = c.task_id";

/// MySQL-backed store. Referential actions (cascades, restrict) come from
/// the schema in `migrations/`.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations");
        sqlx::migrate!().run(&self.pool).await
    }

    async fn ensure_exists(
        &self,
        table: &str,
        key_column: &str,
        entity: &'static str,
        id: i32,
    ) -> StoreResult<()> {
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE {key_column} = ?");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        if count == 0 {
            return Err(StoreError::NotFound { entity, id });
        }
        Ok(())
    }

    async fn delete_by_id(
        &self,
        table: &str,
        key_column: &str,
        entity: &'static str,
        id: i32,
    ) -> StoreResult<()> {
        let sql = format!("DELETE FROM {table} WHERE {key_column} = ?");
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity, id });
        }
        Ok(())
    }

    async fn roles_for(&self, user_id: i32) -> StoreResult<Vec<String>> {
        let mut query = QueryBuilder::<MySql>::new(USER_ROLE_SELECT);
        query
            .push(" WHERE ur.user_id = ")
            .push_bind(user_id)
            .push(" ORDER BY r.role_name");

        let rows = query
            .build_query_as::<UserRoleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(|row| row.role_name).collect())
    }

    async fn get_project_row(&self, id: i32) -> StoreResult<Project> {
        let mut query = QueryBuilder::<MySql>::new(PROJECT_SELECT);
        query.push(" WHERE p.project_id = ").push_bind(id);

        query
            .build_query_as::<ProjectRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .map(Project::from)
            .ok_or(StoreError::NotFound { entity: "Project", id })
    }

    async fn get_comment_row(&self, id: i32) -> StoreResult<CommentRow> {
        let mut query = QueryBuilder::<MySql>::new(COMMENT_SELECT);
        query.push(" WHERE c.comment_id = ").push_bind(id);

        query
            .build_query_as::<CommentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or(StoreError::NotFound { entity: "Comment", id })
    }

    async fn count(&self, table: &str) -> StoreResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn task_buckets(&self, column: &str) -> StoreResult<Vec<ChartBucket>> {
        let sql = format!("SELECT {column} AS name, COUNT(*) AS value FROM Tasks_ GROUP BY {column}");
        let rows = sqlx::query_as::<_, BucketRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        let mut buckets: Vec<ChartBucket> = rows
            .into_iter()
            .map(|row| ChartBucket {
                name: row.name,
                value: row.value,
            })
            .collect();
        sort_buckets(&mut buckets);
        Ok(buckets)
    }
}

/// Turns MySQL constraint failures into the store's own error kinds.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(mysql_err) = db_err.try_downcast_ref::<MySqlDatabaseError>() {
            match mysql_err.number() {
                ER_DUP_ENTRY => {
                    return StoreError::Conflict(
                        "A record with the same unique value already exists".into(),
                    )
                }
                ER_ROW_IS_REFERENCED_2 => {
                    return StoreError::Conflict(
                        "The record is still referenced by other records".into(),
                    )
                }
                ER_NO_REFERENCED_ROW_2 => {
                    return StoreError::InvalidReference(
                        "A referenced record does not exist".into(),
                    )
                }
                _ => {}
            }
        }
    }
    StoreError::Database(err)
}

fn inserted_id(result: &MySqlQueryResult) -> StoreResult<i32> {
    let id = result.last_insert_id();
    i32::try_from(id).map_err(|_| StoreError::Corrupt(format!("insert id {id} out of range")))
}

/// Builds `UPDATE <table> SET ...` from the fields that were provided.
struct Assignments<'args> {
    builder: QueryBuilder<'args, MySql>,
    count: usize,
}

impl<'args> Assignments<'args> {
    fn new(table: &str) -> Self {
        Assignments {
            builder: QueryBuilder::new(format!("UPDATE {table} SET ")),
            count: 0,
        }
    }

    fn set<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, MySql> + Type<MySql> + Send,
    {
        if let Some(value) = value {
            if self.count > 0 {
                self.builder.push(", ");
            }
            self.builder.push(column).push(" = ").push_bind(value);
            self.count += 1;
        }
        self
    }

    /// `None` when nothing was set.
    fn finish(mut self, key_column: &str, id: i32) -> Option<QueryBuilder<'args, MySql>> {
        if self.count == 0 {
            return None;
        }
        self.builder
            .push(" WHERE ")
            .push(key_column)
            .push(" = ")
            .push_bind(id);
        Some(self.builder)
    }
}

#[derive(FromRow)]
struct UserRoleRow {
    user_id: i32,
    role_name: String,
}

#[derive(FromRow)]
struct ProjectRow {
    project_id: i32,
    project_name: String,
    description: Option<String>,
    created_by: i32,
    created_at: NaiveDateTime,
    creator_name: String,
    creator_email: String,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            project_id: row.project_id,
            project_name: row.project_name,
            description: row.description,
            created_by: row.created_by,
            created_at: row.created_at,
            creator: UserSummary {
                user_id: row.created_by,
                user_name: row.creator_name,
                email: row.creator_email,
            },
        }
    }
}

#[derive(FromRow)]
struct TaskListRow {
    list_id: i32,
    list_name: String,
    project_id: i32,
    project_name: String,
}

impl From<TaskListRow> for TaskList {
    fn from(row: TaskListRow) -> Self {
        TaskList {
            list_id: row.list_id,
            list_name: row.list_name,
            project_id: row.project_id,
            project: ProjectSummary {
                project_id: row.project_id,
                project_name: row.project_name,
            },
        }
    }
}

#[derive(FromRow)]
struct TaskItemRow {
    task_id: i32,
    list_id: i32,
    assigned_to: Option<i32>,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    due_date: Option<NaiveDate>,
    created_at: NaiveDateTime,
}

impl TryFrom<TaskItemRow> for TaskItem {
    type Error = StoreError;

    fn try_from(row: TaskItemRow) -> Result<Self, Self::Error> {
        Ok(TaskItem {
            task_id: row.task_id,
            list_id: row.list_id,
            assigned_to: row.assigned_to,
            title: row.title,
            description: row.description,
            status: row
                .status
                .parse()
                .map_err(|e: UnknownVariant| StoreError::Corrupt(e.to_string()))?,
            priority: row
                .priority
                .parse()
                .map_err(|e: UnknownVariant| StoreError::Corrupt(e.to_string()))?,
            due_date: row.due_date,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct TaskRow {
    task_id: i32,
    list_id: i32,
    assigned_to: Option<i32>,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    due_date: Option<NaiveDate>,
    created_at: NaiveDateTime,
    list_name: String,
    project_id: i32,
    assignee_name: Option<String>,
    assignee_email: Option<String>,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let assignee = match (row.assigned_to, row.assignee_name, row.assignee_email) {
            (Some(user_id), Some(user_name), Some(email)) => Some(UserSummary {
                user_id,
                user_name,
                email,
            }),
            _ => None,
        };
        let task_list = TaskListSummary {
            list_id: row.list_id,
            list_name: row.list_name,
            project_id: row.project_id,
        };
        let item = TaskItem::try_from(TaskItemRow {
            task_id: row.task_id,
            list_id: row.list_id,
            assigned_to: row.assigned_to,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            due_date: row.due_date,
            created_at: row.created_at,
        })?;

        Ok(Task {
            item,
            task_list,
            assignee,
        })
    }
}

#[derive(FromRow)]
struct CommentRow {
    comment_id: i32,
    task_id: i32,
    user_id: i32,
    comment_text: String,
    created_at: NaiveDateTime,
    author_name: String,
    author_email: String,
    task_title: String,
}

impl CommentRow {
    fn into_detail(self) -> CommentDetail {
        let task = TaskSummary {
            task_id: self.task_id,
            title: self.task_title.clone(),
        };
        CommentDetail {
            comment: self.into_comment(),
            task,
        }
    }

    fn into_comment(self) -> Comment {
        Comment {
            comment_id: self.comment_id,
            task_id: self.task_id,
            user_id: self.user_id,
            comment_text: self.comment_text,
            created_at: self.created_at,
            author: UserSummary {
                user_id: self.user_id,
                user_name: self.author_name,
                email: self.author_email,
            },
        }
    }
}

#[derive(FromRow)]
struct BucketRow {
    name: String,
    value: i64,
}

#[async_trait]
impl UserStore for MySqlStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "{USER_SELECT} ORDER BY created_at DESC, user_id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        let assignments = sqlx::query_as::<_, UserRoleRow>(&format!(
            "{USER_ROLE_SELECT} ORDER BY r.role_name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        let mut roles: HashMap<i32, Vec<String>> = HashMap::new();
        for row in assignments {
            roles.entry(row.user_id).or_default().push(row.role_name);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let user_roles = roles.remove(&record.user_id).unwrap_or_default();
                record.into_user(user_roles)
            })
            .collect())
    }

    async fn get_user(&self, id: i32) -> StoreResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!("{USER_SELECT} WHERE user_id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or(StoreError::NotFound { entity: "User", id })?;

        let roles = self.roles_for(id).await?;
        Ok(record.into_user(roles))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(&format!("{USER_SELECT} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn user_exists(&self, user_name: &str, email: &str) -> StoreResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM Users_ WHERE user_name = ? OR email = ?")
                .bind(user_name)
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(classify)?;
        Ok(count > 0)
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        let result =
            sqlx::query("INSERT INTO Users_ (user_name, email, password_hash) VALUES (?, ?, ?)")
                .bind(&user.user_name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .execute(&mut *tx)
                .await
                .map_err(classify)?;
        let user_id = inserted_id(&result)?;

        if let Some(role_id) = user.role_id {
            sqlx::query("INSERT INTO UserRoles_ (user_id, role_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(role_id)
                .execute(&mut *tx)
                .await
                .map_err(classify)?;
        }

        tx.commit().await.map_err(classify)?;
        self.get_user(user_id).await
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> StoreResult<User> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Users_ WHERE user_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(classify)?;
        if count == 0 {
            return Err(StoreError::NotFound { entity: "User", id });
        }

        let mut assignments = Assignments::new("Users_");
        assignments
            .set("user_name", changes.user_name)
            .set("email", changes.email)
            .set("password_hash", changes.password_hash);
        if let Some(mut query) = assignments.finish("user_id", id) {
            query.build().execute(&mut *tx).await.map_err(classify)?;
        }

        if let Some(role_id) = changes.role_id {
            sqlx::query("DELETE FROM UserRoles_ WHERE user_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(classify)?;
            sqlx::query("INSERT INTO UserRoles_ (user_id, role_id) VALUES (?, ?)")
                .bind(id)
                .bind(role_id)
                .execute(&mut *tx)
                .await
                .map_err(classify)?;
        }

        tx.commit().await.map_err(classify)?;
        self.get_user(id).await
    }

    async fn delete_user(&self, id: i32) -> StoreResult<()> {
        self.delete_by_id("Users_", "user_id", "User", id).await
    }
}

#[async_trait]
impl RoleStore for MySqlStore {
    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT role_id, role_name FROM Roles_ ORDER BY role_id")
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn get_role(&self, id: i32) -> StoreResult<Role> {
        sqlx::query_as::<_, Role>("SELECT role_id, role_name FROM Roles_ WHERE role_id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or(StoreError::NotFound { entity: "Role", id })
    }

    async fn find_role_by_name(&self, role_name: &str) -> StoreResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT role_id, role_name FROM Roles_ WHERE role_name = ?")
            .bind(role_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn create_role(&self, role_name: String) -> StoreResult<Role> {
        let result = sqlx::query("INSERT INTO Roles_ (role_name) VALUES (?)")
            .bind(&role_name)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        Ok(Role {
            role_id: inserted_id(&result)?,
            role_name,
        })
    }

    async fn update_role(&self, id: i32, role_name: Option<String>) -> StoreResult<Role> {
        self.ensure_exists("Roles_", "role_id", "Role", id).await?;

        let mut assignments = Assignments::new("Roles_");
        assignments.set("role_name", role_name);
        if let Some(mut query) = assignments.finish("role_id", id) {
            query.build().execute(&self.pool).await.map_err(classify)?;
        }

        self.get_role(id).await
    }

    async fn delete_role(&self, id: i32) -> StoreResult<()> {
        self.delete_by_id("Roles_", "role_id", "Role", id).await
    }
}

#[async_trait]
impl ProjectStore for MySqlStore {
    async fn list_projects(&self, created_by: Option<i32>) -> StoreResult<Vec<Project>> {
        let mut query = QueryBuilder::<MySql>::new(PROJECT_SELECT);
        if let Some(user_id) = created_by {
            query.push(" WHERE p.created_by = ").push_bind(user_id);
        }
        query.push(" ORDER BY p.created_at DESC, p.project_id DESC");

        let rows = query
            .build_query_as::<ProjectRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn get_project(&self, id: i32) -> StoreResult<ProjectDetail> {
        let project = self.get_project_row(id).await?;

        let lists = sqlx::query_as::<_, TaskListRow>(&format!(
            "{TASK_LIST_SELECT} WHERE l.project_id = ? ORDER BY l.list_id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        let task_rows = sqlx::query_as::<_, TaskItemRow>(
            "SELECT t.task_id, t.list_id, t.assigned_to, t.title, t.description, t.status,
                    t.priority, t.due_date, t.created_at
             FROM Tasks_ t
             JOIN TaskLists_ l ON l.list_id = t.list_id
             WHERE l.project_id = ?
             ORDER BY t.created_at DESC, t.task_id DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        let mut tasks_by_list: HashMap<i32, Vec<TaskItem>> = HashMap::new();
        for row in task_rows {
            let item = TaskItem::try_from(row)?;
            tasks_by_list.entry(item.list_id).or_default().push(item);
        }

        let task_lists = lists
            .into_iter()
            .map(|list| ProjectTaskList {
                tasks: tasks_by_list.remove(&list.list_id).unwrap_or_default(),
                list_id: list.list_id,
                list_name: list.list_name,
            })
            .collect();

        Ok(ProjectDetail {
            project,
            task_lists,
        })
    }

    async fn create_project(&self, project: NewProject) -> StoreResult<Project> {
        let result = sqlx::query(
            "INSERT INTO Projects_ (project_name, description, created_by) VALUES (?, ?, ?)",
        )
        .bind(&project.project_name)
        .bind(&project.description)
        .bind(project.created_by)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        self.get_project_row(inserted_id(&result)?).await
    }

    async fn update_project(&self, id: i32, changes: ProjectChanges) -> StoreResult<Project> {
        self.ensure_exists("Projects_", "project_id", "Project", id)
            .await?;

        let mut assignments = Assignments::new("Projects_");
        assignments
            .set("project_name", changes.project_name)
            .set("description", changes.description);
        if let Some(mut query) = assignments.finish("project_id", id) {
            query.build().execute(&self.pool).await.map_err(classify)?;
        }

        self.get_project_row(id).await
    }

    async fn delete_project(&self, id: i32) -> StoreResult<()> {
        self.delete_by_id("Projects_", "project_id", "Project", id)
            .await
    }
}

#[async_trait]
impl TaskListStore for MySqlStore {
    async fn list_task_lists(&self, project_id: Option<i32>) -> StoreResult<Vec<TaskList>> {
        let mut query = QueryBuilder::<MySql>::new(TASK_LIST_SELECT);
        if let Some(project_id) = project_id {
            query.push(" WHERE l.project_id = ").push_bind(project_id);
        }
        query.push(" ORDER BY l.list_id");

        let rows = query
            .build_query_as::<TaskListRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(TaskList::from).collect())
    }

    async fn get_task_list(&self, id: i32) -> StoreResult<TaskList> {
        sqlx::query_as::<_, TaskListRow>(&format!("{TASK_LIST_SELECT} WHERE l.list_id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .map(TaskList::from)
            .ok_or(StoreError::NotFound { entity: "Task list", id })
    }

    async fn create_task_list(&self, list: NewTaskList) -> StoreResult<TaskList> {
        let result = sqlx::query("INSERT INTO TaskLists_ (list_name, project_id) VALUES (?, ?)")
            .bind(&list.list_name)
            .bind(list.project_id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        self.get_task_list(inserted_id(&result)?).await
    }

    async fn update_task_list(&self, id: i32, changes: TaskListChanges) -> StoreResult<TaskList> {
        self.ensure_exists("TaskLists_", "list_id", "Task list", id)
            .await?;

        let mut assignments = Assignments::new("TaskLists_");
        assignments
            .set("list_name", changes.list_name)
            .set("project_id", changes.project_id);
        if let Some(mut query) = assignments.finish("list_id", id) {
            query.build().execute(&self.pool).await.map_err(classify)?;
        }

        self.get_task_list(id).await
    }

    async fn delete_task_list(&self, id: i32) -> StoreResult<()> {
        self.delete_by_id("TaskLists_", "list_id", "Task list", id)
            .await
    }
}

#[async_trait]
impl TaskStore for MySqlStore {
    async fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        let mut query = QueryBuilder::<MySql>::new(TASK_SELECT);
        query.push(" WHERE 1 = 1");
        if let Some(list_id) = filter.list_id {
            query.push(" AND t.list_id = ").push_bind(list_id);
        }
        if let Some(project_id) = filter.project_id {
            query.push(" AND l.project_id = ").push_bind(project_id);
        }
        query.push(" ORDER BY t.created_at DESC, t.task_id DESC");

        let rows = query
            .build_query_as::<TaskRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        rows.into_iter().map(Task::try_from).collect()
    }

    async fn get_task(&self, id: i32) -> StoreResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(&format!("{TASK_SELECT} WHERE t.task_id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or(StoreError::NotFound { entity: "Task", id })?;
        Task::try_from(row)
    }

    async fn create_task(&self, task: NewTask) -> StoreResult<Task> {
        let result = sqlx::query(
            "INSERT INTO Tasks_ (list_id, assigned_to, title, description, status, priority, due_date)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(task.list_id)
        .bind(task.assigned_to)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        self.get_task(inserted_id(&result)?).await
    }

    async fn update_task(&self, id: i32, changes: TaskChanges) -> StoreResult<Task> {
        self.ensure_exists("Tasks_", "task_id", "Task", id).await?;

        let mut assignments = Assignments::new("Tasks_");
        assignments
            .set("list_id", changes.list_id)
            .set("assigned_to", changes.assigned_to)
            .set("title", changes.title)
            .set("description", changes.description)
            .set("status", changes.status.map(|status| status.as_str()))
            .set("priority", changes.priority.map(|priority| priority.as_str()))
            .set("due_date", changes.due_date);
        if let Some(mut query) = assignments.finish("task_id", id) {
            query.build().execute(&self.pool).await.map_err(classify)?;
        }

        self.get_task(id).await
    }

    async fn delete_task(&self, id: i32) -> StoreResult<()> {
        self.delete_by_id("Tasks_", "task_id", "Task", id).await
    }
}

#[async_trait]
impl CommentStore for MySqlStore {
    async fn list_comments(&self, task_id: Option<i32>) -> StoreResult<Vec<Comment>> {
        let mut query = QueryBuilder::<MySql>::new(COMMENT_SELECT);
        if let Some(task_id) = task_id {
            query.push(" WHERE c.task_id = ").push_bind(task_id);
        }
        query.push(" ORDER BY c.created_at ASC, c.comment_id ASC");

        let rows = query
            .build_query_as::<CommentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn get_comment(&self, id: i32) -> StoreResult<CommentDetail> {
        Ok(self.get_comment_row(id).await?.into_detail())
    }

    async fn create_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let result =
            sqlx::query("INSERT INTO TaskComments_ (task_id, user_id, comment_text) VALUES (?, ?, ?)")
                .bind(comment.task_id)
                .bind(comment.user_id)
                .bind(&comment.comment_text)
                .execute(&self.pool)
                .await
                .map_err(classify)?;

        Ok(self.get_comment_row(inserted_id(&result)?).await?.into_comment())
    }

    async fn update_comment(&self, id: i32, comment_text: String) -> StoreResult<Comment> {
        self.ensure_exists("TaskComments_", "comment_id", "Comment", id)
            .await?;

        sqlx::query("UPDATE TaskComments_ SET comment_text = ? WHERE comment_id = ?")
            .bind(&comment_text)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        Ok(self.get_comment_row(id).await?.into_comment())
    }

    async fn delete_comment(&self, id: i32) -> StoreResult<()> {
        self.delete_by_id("TaskComments_", "comment_id", "Comment", id)
            .await
    }
}

#[async_trait]
impl StatsStore for MySqlStore {
    async fn stats(&self) -> StoreResult<Stats> {
        Ok(Stats {
            users: self.count("Users_").await?,
            projects: self.count("Projects_").await?,
            task_lists: self.count("TaskLists_").await?,
            tasks: self.count("Tasks_").await?,
            roles: self.count("Roles_").await?,
            charts: Charts {
                tasks_by_status: self.task_buckets("status").await?,
                tasks_by_priority: self.task_buckets("priority").await?,
            },
        })
    }
}
