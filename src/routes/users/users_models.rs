use serde::Deserialize;

use crate::error::AppResult;
use crate::models::user::{NewUser, UserChanges};
use crate::routes::common::RequiredFields;
use crate::routes::login::password::hash_password;
use crate::serde_utils::optional_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
    /// Plain password; hashed before it reaches the store.
    #[serde(alias = "PasswordHash")]
    pub password: Option<String>,
    #[serde(rename = "RoleID", default, deserialize_with = "optional_id")]
    pub role_id: Option<i32>,
}

impl UserRequest {
    pub async fn into_new_user(self) -> AppResult<NewUser> {
        RequiredFields::new()
            .text("UserName", &self.user_name)
            .text("Email", &self.email)
            .text("Password", &self.password)
            .check()?;

        Ok(NewUser {
            user_name: self.user_name.unwrap_or_default().trim().to_string(),
            email: self.email.unwrap_or_default().trim().to_string(),
            password_hash: hash_password(&self.password.unwrap_or_default()).await?,
            role_id: self.role_id,
        })
    }

    pub async fn into_changes(self) -> AppResult<UserChanges> {
        RequiredFields::new()
            .not_blank("UserName", &self.user_name)
            .not_blank("Email", &self.email)
            .not_blank("Password", &self.password)
            .check()?;

        let password_hash = match self.password {
            Some(password) => Some(hash_password(&password).await?),
            None => None,
        };

        Ok(UserChanges {
            user_name: self.user_name.map(|name| name.trim().to_string()),
            email: self.email.map(|email| email.trim().to_string()),
            password_hash,
            role_id: self.role_id,
        })
    }
}
