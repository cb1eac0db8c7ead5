use serde::Deserialize;

use crate::error::AppResult;
use crate::routes::common::RequiredFields;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleRequest {
    pub role_name: Option<String>,
}

impl RoleRequest {
    pub fn into_role_name(self) -> AppResult<String> {
        RequiredFields::new().text("RoleName", &self.role_name).check()?;
        Ok(self.role_name.unwrap_or_default().trim().to_string())
    }

    pub fn into_changes(self) -> AppResult<Option<String>> {
        RequiredFields::new().not_blank("RoleName", &self.role_name).check()?;
        Ok(self.role_name.map(|name| name.trim().to_string()))
    }
}
