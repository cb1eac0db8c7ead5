use serde::Deserialize;

use crate::error::AppResult;
use crate::models::project::{NewProject, ProjectChanges};
use crate::routes::common::RequiredFields;
use crate::serde_utils::optional_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectRequest {
    pub project_name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub created_by: Option<i32>,
}

impl ProjectRequest {
    pub fn into_new_project(self) -> AppResult<NewProject> {
        RequiredFields::new()
            .text("ProjectName", &self.project_name)
            .value("CreatedBy", &self.created_by)
            .check()?;

        Ok(NewProject {
            project_name: self.project_name.unwrap_or_default().trim().to_string(),
            description: self.description,
            created_by: self.created_by.unwrap_or_default(),
        })
    }

    /// The creator is fixed once the project exists; `CreatedBy` is ignored.
    pub fn into_changes(self) -> AppResult<ProjectChanges> {
        RequiredFields::new()
            .not_blank("ProjectName", &self.project_name)
            .check()?;

        Ok(ProjectChanges {
            project_name: self.project_name.map(|name| name.trim().to_string()),
            description: self.description,
        })
    }
}

/// `?userId=` narrows the list to one creator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<i32>,
}
