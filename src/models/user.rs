use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use super::role::is_admin_role;

/// A user row as stored, including the password hash.
///
/// Never serialized; handlers only ever return [`User`] or [`UserSummary`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl UserRecord {
    pub fn into_user(self, roles: Vec<String>) -> User {
        User {
            user_id: self.user_id,
            user_name: self.user_name,
            email: self.email,
            created_at: self.created_at,
            roles,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            user_id: self.user_id,
            user_name: self.user_name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "UserID")]
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub roles: Vec<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| is_admin_role(role))
    }
}

/// Shallow projection embedded in projects, tasks and comments.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    #[serde(rename = "UserID")]
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: Option<i32>,
}

/// Fields left as `None` are not written. A `role_id` replaces every role the
/// user currently holds.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role_id: Option<i32>,
}
