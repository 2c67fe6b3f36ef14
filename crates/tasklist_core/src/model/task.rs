//! Task domain model.
//!
//! # Responsibility
//! - Define the task record owned by the store.
//! - Define the filter selector applied to derived reads.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and non-empty; there is no edit operation, so it is
//!   immutable after construction.
//! - `completed` changes only through the store's toggle operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task held by the store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// A user-entered to-do item with identity, text, and completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable ID used by the UI to address toggle/delete gestures.
    pub id: TaskId,
    /// Trimmed, non-empty task description.
    pub text: String,
    /// Completion flag, flipped only by the toggle operation.
    pub completed: bool,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - The caller must pass already-trimmed, non-empty text; the store's
    ///   add operation is the only construction path that enforces this.
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}

/// The active view selector for derived reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Every task, regardless of completion.
    #[default]
    All,
    /// Tasks with `completed == false`.
    Active,
    /// Tasks with `completed == true`.
    Completed,
}

impl FilterMode {
    /// Returns whether a task is visible under this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Stable string form used at the FFI edge.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parses the stable string form. Case-insensitive, whitespace-tolerant.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}
