use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Collects absent or blank fields so one error can name all of them.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required text: missing, `null` and whitespace-only all count as absent.
    pub fn text(mut self, name: &'static str, value: &Option<String>) -> Self {
        if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
            self.missing.push(name);
        }
        self
    }

    pub fn value<T>(mut self, name: &'static str, value: &Option<T>) -> Self {
        if value.is_none() {
            self.missing.push(name);
        }
        self
    }

    /// Optional text that, when sent, must not be blank (partial updates).
    pub fn not_blank(mut self, name: &'static str, value: &Option<String>) -> Self {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            self.missing.push(name);
        }
        self
    }

    pub fn check(self) -> AppResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::missing_fields(self.missing))
        }
    }
}

/// Fallback for unknown paths under `/api`, so they get a JSON body too.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No route for {}", req.path())))
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {err}")).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, _req| AppError::BadRequest("Invalid ID".into()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query parameter: {err}")).into()
    })
}
