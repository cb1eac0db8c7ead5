// src/models/mod.rs

pub mod comment;
pub mod project;
pub mod role;
pub mod stats;
pub mod task;
pub mod task_list;
pub mod user;
