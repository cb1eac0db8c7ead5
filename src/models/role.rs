use serde::Serialize;
use sqlx::FromRow;

/// Role granted to newly registered users.
pub const DEFAULT_ROLE: &str = "User";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Role {
    #[serde(rename = "RoleID")]
    pub role_id: i32,
    pub role_name: String,
}

pub fn is_admin_role(role_name: &str) -> bool {
    role_name.eq_ignore_ascii_case("admin")
}
