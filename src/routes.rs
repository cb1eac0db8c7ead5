pub mod admin;
pub mod comments;
pub mod common;
pub mod login;
pub mod projects;
pub mod roles;
pub mod routes;
pub mod task_lists;
pub mod tasks;
pub mod users;
