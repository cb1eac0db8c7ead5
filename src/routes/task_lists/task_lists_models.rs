use serde::Deserialize;

use crate::error::AppResult;
use crate::models::task_list::{NewTaskList, TaskListChanges};
use crate::routes::common::RequiredFields;
use crate::serde_utils::optional_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskListRequest {
    #[serde(rename = "ProjectID", default, deserialize_with = "optional_id")]
    pub project_id: Option<i32>,
    pub list_name: Option<String>,
}

impl TaskListRequest {
    pub fn into_new_list(self) -> AppResult<NewTaskList> {
        RequiredFields::new()
            .value("ProjectID", &self.project_id)
            .text("ListName", &self.list_name)
            .check()?;

        Ok(NewTaskList {
            list_name: self.list_name.unwrap_or_default().trim().to_string(),
            project_id: self.project_id.unwrap_or_default(),
        })
    }

    pub fn into_changes(self) -> AppResult<TaskListChanges> {
        RequiredFields::new()
            .not_blank("ListName", &self.list_name)
            .check()?;

        Ok(TaskListChanges {
            list_name: self.list_name.map(|name| name.trim().to_string()),
            project_id: self.project_id,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub project_id: Option<i32>,
}
