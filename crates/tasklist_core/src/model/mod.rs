//! Domain model for the task-list screen.
//!
//! # Responsibility
//! - Define the canonical task record and the view selectors (filter, theme).
//! - Keep model types free of storage and presentation concerns.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` that is never reused.
//! - Task text is trimmed and non-empty from the moment of construction.

pub mod task;
pub mod theme;
