//! Task-list store operations and error contract.
//!
//! # Responsibility
//! - Apply add/toggle/delete/clear mutations against the owned collection.
//! - Serve the filtered projection without mutating state.
//!
//! # Invariants
//! - Task IDs are pairwise distinct at every instant.
//! - Insertion order is preserved; filtering never reorders.
//! - `InvalidInput` and `NotFound` are recoverable; no operation panics or
//!   leaves the store in a partially applied state.

use crate::model::task::{FilterMode, Task, TaskId};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Recoverable failure conditions reported by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Add was called with empty or whitespace-only text.
    InvalidInput,
    /// Toggle/delete referenced an ID not present in the collection,
    /// e.g. a stale reference after a UI double-tap.
    NotFound(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "task text cannot be empty or whitespace-only"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Owner of the authoritative task collection and the active filter.
///
/// One instance is constructed per screen and dropped with it; there is no
/// process-wide singleton. All access is synchronous and single-writer, so
/// every mutation is atomic with respect to the next derived read.
#[derive(Debug, Default)]
pub struct TaskListStore {
    tasks: Vec<Task>,
    filter: FilterMode,
}

impl TaskListStore {
    /// Creates an empty store with filter `All`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new incomplete task built from `raw_text`.
    ///
    /// # Contract
    /// - Trims `raw_text`; rejects `InvalidInput` when nothing remains.
    /// - On success the new task carries a fresh ID distinct from every
    ///   task currently held, and lands at the end of the collection.
    ///
    /// # Errors
    /// - `StoreError::InvalidInput` when the trimmed text is empty; the
    ///   collection is left unchanged.
    pub fn add(&mut self, raw_text: &str) -> StoreResult<Task> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("event=task_add_rejected module=store status=invalid_input");
            return Err(StoreError::InvalidInput);
        }

        let task = Task::new(text);
        self.tasks.push(task.clone());
        debug!(
            "event=task_added module=store status=ok id={} total={}",
            task.id,
            self.tasks.len()
        );
        Ok(task)
    }

    /// Flips `completed` on the task matching `id` and returns the new value.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no task carries `id`; the collection
    ///   is left unchanged, including order.
    pub fn toggle_complete(&mut self, id: TaskId) -> StoreResult<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.completed = !task.completed;
        debug!(
            "event=task_toggled module=store status=ok id={id} completed={}",
            task.completed
        );
        Ok(task.completed)
    }

    /// Removes the task matching `id`, preserving the relative order of the
    /// remainder.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no task carries `id`; the collection
    ///   is left unchanged.
    pub fn delete(&mut self, id: TaskId) -> StoreResult<()> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.tasks.remove(position);
        debug!(
            "event=task_deleted module=store status=ok id={id} total={}",
            self.tasks.len()
        );
        Ok(())
    }

    /// Unconditionally empties the collection and returns the removed count.
    ///
    /// Confirmation is the caller's concern: the presentation layer prompts
    /// before invoking this on a non-empty list; the store clears
    /// immediately when called. Clearing an empty store returns `0`.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.tasks.len();
        self.tasks.clear();
        debug!("event=tasks_cleared module=store status=ok removed={removed}");
        removed
    }

    /// Replaces the active filter. The collection itself is untouched; only
    /// subsequent derived reads change.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
        debug!(
            "event=filter_set module=store status=ok filter={}",
            mode.as_str()
        );
    }

    /// Returns the subsequence of the collection matching the active
    /// filter, in insertion order.
    ///
    /// Pure projection: safe to call arbitrarily often, always reflecting
    /// the latest committed mutation, never mutating the store.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// The currently active filter.
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// The full collection in insertion order, ignoring the filter.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks held, ignoring the filter.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty, ignoring the filter.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
