use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::user::User;
use crate::routes::common::RequiredFields;

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn into_credentials(self) -> AppResult<Credentials> {
        RequiredFields::new()
            .text("email", &self.email)
            .text("password", &self.password)
            .check()?;

        Ok(Credentials {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Checks every field and reports all failures at once.
    pub fn validate(self) -> AppResult<Registration> {
        let username = self.username.unwrap_or_default().trim().to_string();
        let email = self.email.unwrap_or_default().trim().to_string();
        let password = self.password.unwrap_or_default();

        let mut invalid = Vec::new();
        if username.chars().count() < MIN_USERNAME_LEN {
            invalid.push("username");
        }
        if !is_valid_email(&email) {
            invalid.push("email");
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            invalid.push("password");
        }

        if !invalid.is_empty() {
            return Err(AppError::invalid_fields(
                format!("Invalid registration fields: {}", invalid.join(", ")),
                invalid,
            ));
        }

        Ok(Registration {
            username,
            email,
            password,
        })
    }
}

/// One `@`, something before it, and a dot inside the domain part.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}
