use serde::Deserialize;

use crate::error::AppResult;
use crate::models::comment::NewComment;
use crate::routes::common::RequiredFields;
use crate::serde_utils::optional_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommentRequest {
    #[serde(rename = "TaskID", default, deserialize_with = "optional_id")]
    pub task_id: Option<i32>,
    #[serde(rename = "UserID", default, deserialize_with = "optional_id")]
    pub user_id: Option<i32>,
    pub comment_text: Option<String>,
}

impl CommentRequest {
    pub fn into_new_comment(self) -> AppResult<NewComment> {
        RequiredFields::new()
            .value("TaskID", &self.task_id)
            .value("UserID", &self.user_id)
            .text("CommentText", &self.comment_text)
            .check()?;

        Ok(NewComment {
            task_id: self.task_id.unwrap_or_default(),
            user_id: self.user_id.unwrap_or_default(),
            comment_text: self.comment_text.unwrap_or_default(),
        })
    }

    /// Only the text of a comment can change, and it stays required.
    pub fn into_text(self) -> AppResult<String> {
        RequiredFields::new()
            .text("CommentText", &self.comment_text)
            .check()?;
        Ok(self.comment_text.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub task_id: Option<i32>,
}
