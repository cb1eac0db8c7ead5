use chrono::NaiveDateTime;
use serde::Serialize;

use super::task::TaskSummary;
use super::user::UserSummary;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Comment {
    #[serde(rename = "CommentID")]
    pub comment_id: i32,
    #[serde(rename = "TaskID")]
    pub task_id: i32,
    #[serde(rename = "UserID")]
    pub user_id: i32,
    pub comment_text: String,
    pub created_at: NaiveDateTime,
    pub author: UserSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommentDetail {
    #[serde(flatten)]
    pub comment: Comment,
    pub task: TaskSummary,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub task_id: i32,
    pub user_id: i32,
    pub comment_text: String,
}
