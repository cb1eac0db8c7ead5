use serde::Serialize;

use super::project::ProjectSummary;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskList {
    #[serde(rename = "ListID")]
    pub list_id: i32,
    pub list_name: String,
    #[serde(rename = "ProjectID")]
    pub project_id: i32,
    pub project: ProjectSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskListSummary {
    #[serde(rename = "ListID")]
    pub list_id: i32,
    pub list_name: String,
    #[serde(rename = "ProjectID")]
    pub project_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewTaskList {
    pub list_name: String,
    pub project_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct TaskListChanges {
    pub list_name: Option<String>,
    pub project_id: Option<i32>,
}
