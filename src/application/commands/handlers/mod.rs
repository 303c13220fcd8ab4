//! Command Handlers 实现

mod edit_handlers;

pub use edit_handlers::*;
