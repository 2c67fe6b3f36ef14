//! Core domain logic for the task-list app.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{FilterMode, Task, TaskId};
pub use model::theme::ThemeMode;
pub use store::task_list::{StoreError, StoreResult, TaskListStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
