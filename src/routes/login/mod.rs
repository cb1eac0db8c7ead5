pub mod login_handlers;
pub mod login_models;
pub mod password;
