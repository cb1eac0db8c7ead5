pub mod task_lists_handlers;
pub mod task_lists_models;
