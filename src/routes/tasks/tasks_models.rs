use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::task::{NewTask, TaskChanges, TaskFilter, TaskPriority, TaskStatus};
use crate::routes::common::RequiredFields;
use crate::serde_utils::{optional_date, optional_id};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskRequest {
    #[serde(rename = "ListID", default, deserialize_with = "optional_id")]
    pub list_id: Option<i32>,
    #[serde(default, deserialize_with = "optional_id")]
    pub assigned_to: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
}

impl TaskRequest {
    pub fn into_new_task(self) -> AppResult<NewTask> {
        RequiredFields::new()
            .value("ListID", &self.list_id)
            .text("Title", &self.title)
            .check()?;

        Ok(NewTask {
            list_id: self.list_id.unwrap_or_default(),
            assigned_to: self.assigned_to,
            title: self.title.unwrap_or_default().trim().to_string(),
            description: self.description,
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            due_date: self.due_date,
        })
    }

    pub fn into_changes(self) -> AppResult<TaskChanges> {
        RequiredFields::new().not_blank("Title", &self.title).check()?;

        Ok(TaskChanges {
            list_id: self.list_id,
            assigned_to: self.assigned_to,
            title: self.title.map(|title| title.trim().to_string()),
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub list_id: Option<i32>,
    #[serde(default, deserialize_with = "optional_id")]
    pub project_id: Option<i32>,
}

impl From<TaskQuery> for TaskFilter {
    fn from(query: TaskQuery) -> Self {
        TaskFilter {
            list_id: query.list_id,
            project_id: query.project_id,
        }
    }
}
