pub mod admin_gate;
pub mod admin_handlers;
