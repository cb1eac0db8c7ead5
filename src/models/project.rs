use chrono::NaiveDateTime;
use serde::Serialize;

use super::task::TaskItem;
use super::user::UserSummary;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    #[serde(rename = "ProjectID")]
    pub project_id: i32,
    pub project_name: String,
    pub description: Option<String>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub creator: UserSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectSummary {
    #[serde(rename = "ProjectID")]
    pub project_id: i32,
    pub project_name: String,
}

/// A project together with its task lists and their tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub task_lists: Vec<ProjectTaskList>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectTaskList {
    #[serde(rename = "ListID")]
    pub list_id: i32,
    pub list_name: String,
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_name: String,
    pub description: Option<String>,
    pub created_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub project_name: Option<String>,
    pub description: Option<String>,
}
