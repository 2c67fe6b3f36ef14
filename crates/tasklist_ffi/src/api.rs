//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Tie one `TaskListStore` instance to each screen session's lifecycle.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Session access is serialized through one registry lock, so every
//!   mutation is atomic with respect to the next `tasks_visible` read.
//! - Confirmation for clear-all stays in the Dart layer; `task_count`
//!   exists so the UI can gate the prompt on a non-empty list.

use log::info;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FilterMode, Task, TaskId, TaskListStore, ThemeMode,
};
use uuid::Uuid;

static SESSIONS: OnceLock<Mutex<SessionRegistry>> = OnceLock::new();

/// Screen-scoped state: one store plus the visual theme selector.
struct ScreenSession {
    store: TaskListStore,
    theme: ThemeMode,
}

#[derive(Default)]
struct SessionRegistry {
    next_handle: u64,
    sessions: HashMap<u64, ScreenSession>,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task snapshot crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task ID in string form.
    pub id: String,
    /// Trimmed task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
}

impl From<&Task> for TaskItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            text: task.text.clone(),
            completed: task.completed,
        }
    }
}

/// Generic action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Snapshot of the affected task, when one exists.
    pub task: Option<TaskItem>,
    /// Human-readable response message for diagnostics/UI cues.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task: Option<TaskItem>) -> Self {
        Self {
            ok: true,
            task,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            message: message.into(),
        }
    }
}

/// List response envelope for derived reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Visible tasks under the session's active filter, insertion-ordered.
    pub items: Vec<TaskItem>,
    /// Active filter in string form (`all|active|completed`).
    pub filter: String,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Count response envelope; used by the UI to gate the clear-all prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCountResponse {
    pub ok: bool,
    /// Number of tasks held, ignoring the filter.
    pub count: u32,
    pub message: String,
}

/// Clear response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearAllResponse {
    pub ok: bool,
    /// Number of tasks removed; `0` on an already-empty list.
    pub removed: u32,
    pub message: String,
}

/// Theme response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeResponse {
    pub ok: bool,
    /// Active theme in string form (`light|dark`).
    pub theme: String,
    pub message: String,
}

/// Opens a new screen session owning a fresh, empty store.
///
/// # FFI contract
/// - Sync call, non-blocking, in-memory only.
/// - Returns an opaque handle passed to every task operation; the handle
///   stays valid until `screen_close`.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_open() -> u64 {
    let mut registry = lock_sessions();
    registry.next_handle += 1;
    let handle = registry.next_handle;
    registry.sessions.insert(
        handle,
        ScreenSession {
            store: TaskListStore::new(),
            theme: ThemeMode::default(),
        },
    );
    info!("event=screen_open module=ffi status=ok handle={handle}");
    handle
}

/// Closes a screen session, dropping its store and all held tasks.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Closing an unknown or already-closed handle fails softly.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_close(handle: u64) -> TaskActionResponse {
    let mut registry = lock_sessions();
    match registry.sessions.remove(&handle) {
        Some(session) => {
            info!(
                "event=screen_close module=ffi status=ok handle={handle} dropped_tasks={}",
                session.store.len()
            );
            TaskActionResponse::success("Screen closed.", None)
        }
        None => TaskActionResponse::failure(format!("screen_close failed: unknown handle {handle}")),
    }
}

/// Adds a task from the input widget's raw text.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Empty or whitespace-only text fails softly so the widget can play its
///   rejected-input cue.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(handle: u64, text: String) -> TaskActionResponse {
    with_session(handle, |session| match session.store.add(&text) {
        Ok(task) => TaskActionResponse::success("Task added.", Some(TaskItem::from(&task))),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    })
}

/// Toggles completion on the task matching `id`.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Unparsable or stale ids fail softly (UI double-taps are expected).
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(handle: u64, id: String) -> TaskActionResponse {
    let Some(task_id) = parse_task_id(&id) else {
        return TaskActionResponse::failure(format!("task_toggle failed: invalid task id `{id}`"));
    };
    with_session(handle, |session| {
        match session.store.toggle_complete(task_id) {
            Ok(_) => {
                let task = session
                    .store
                    .tasks()
                    .iter()
                    .find(|task| task.id == task_id)
                    .map(TaskItem::from);
                TaskActionResponse::success("Task toggled.", task)
            }
            Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
        }
    })
}

/// Deletes the task matching `id`.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Unparsable or stale ids fail softly.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(handle: u64, id: String) -> TaskActionResponse {
    let Some(task_id) = parse_task_id(&id) else {
        return TaskActionResponse::failure(format!("task_delete failed: invalid task id `{id}`"));
    };
    with_session(handle, |session| match session.store.delete(task_id) {
        Ok(()) => TaskActionResponse::success("Task deleted.", None),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    })
}

/// Unconditionally clears the session's task list.
///
/// The Dart layer is responsible for the confirmation prompt; a declined
/// prompt must simply not call this function.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Returns the removed count; `0` is a valid no-op result.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_clear_all(handle: u64) -> ClearAllResponse {
    let mut registry = lock_sessions();
    match registry.sessions.get_mut(&handle) {
        Some(session) => {
            let removed = session.store.clear_all();
            ClearAllResponse {
                ok: true,
                removed: clamp_count(removed),
                message: format!("Cleared {removed} task(s)."),
            }
        }
        None => ClearAllResponse {
            ok: false,
            removed: 0,
            message: format!("tasks_clear_all failed: unknown handle {handle}"),
        },
    }
}

/// Replaces the session's active filter (`all|active|completed`).
///
/// # FFI contract
/// - Sync call, never panics.
/// - Unknown filter names fail softly and leave the filter unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn filter_set(handle: u64, mode: String) -> TaskActionResponse {
    let Some(filter) = FilterMode::parse(&mode) else {
        return TaskActionResponse::failure(format!(
            "filter_set failed: unknown filter `{mode}`; expected all|active|completed"
        ));
    };
    with_session(handle, |session| {
        session.store.set_filter(filter);
        TaskActionResponse::success(format!("Filter set to {}.", filter.as_str()), None)
    })
}

/// Returns the tasks visible under the session's active filter.
///
/// # FFI contract
/// - Sync call, never panics, no side effects.
/// - Always reflects the latest completed mutation, insertion-ordered.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_visible(handle: u64) -> TaskListResponse {
    let registry = lock_sessions();
    match registry.sessions.get(&handle) {
        Some(session) => {
            let items: Vec<TaskItem> = session
                .store
                .visible_tasks()
                .into_iter()
                .map(TaskItem::from)
                .collect();
            let message = if items.is_empty() {
                "No tasks visible.".to_string()
            } else {
                format!("{} task(s) visible.", items.len())
            };
            TaskListResponse {
                items,
                filter: session.store.filter().as_str().to_string(),
                message,
            }
        }
        None => TaskListResponse {
            items: Vec::new(),
            filter: FilterMode::default().as_str().to_string(),
            message: format!("tasks_visible failed: unknown handle {handle}"),
        },
    }
}

/// Returns the total task count, ignoring the filter.
///
/// # FFI contract
/// - Sync call, never panics, no side effects.
#[flutter_rust_bridge::frb(sync)]
pub fn task_count(handle: u64) -> TaskCountResponse {
    let registry = lock_sessions();
    match registry.sessions.get(&handle) {
        Some(session) => TaskCountResponse {
            ok: true,
            count: clamp_count(session.store.len()),
            message: String::new(),
        },
        None => TaskCountResponse {
            ok: false,
            count: 0,
            message: format!("task_count failed: unknown handle {handle}"),
        },
    }
}

/// Toggles the session's light/dark theme and returns the new mode.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle(handle: u64) -> ThemeResponse {
    let mut registry = lock_sessions();
    match registry.sessions.get_mut(&handle) {
        Some(session) => {
            session.theme = session.theme.toggled();
            info!(
                "event=theme_toggled module=ffi status=ok handle={handle} theme={}",
                session.theme.as_str()
            );
            ThemeResponse {
                ok: true,
                theme: session.theme.as_str().to_string(),
                message: String::new(),
            }
        }
        None => ThemeResponse {
            ok: false,
            theme: ThemeMode::default().as_str().to_string(),
            message: format!("theme_toggle failed: unknown handle {handle}"),
        },
    }
}

/// Returns the session's current theme without changing it.
///
/// # FFI contract
/// - Sync call, never panics, no side effects.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_current(handle: u64) -> ThemeResponse {
    let registry = lock_sessions();
    match registry.sessions.get(&handle) {
        Some(session) => ThemeResponse {
            ok: true,
            theme: session.theme.as_str().to_string(),
            message: String::new(),
        },
        None => ThemeResponse {
            ok: false,
            theme: ThemeMode::default().as_str().to_string(),
            message: format!("theme_current failed: unknown handle {handle}"),
        },
    }
}

fn lock_sessions() -> MutexGuard<'static, SessionRegistry> {
    // A poisoned lock means another UI call panicked mid-operation; the
    // registry itself is still structurally valid, so keep serving.
    SESSIONS
        .get_or_init(|| Mutex::new(SessionRegistry::default()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_session(
    handle: u64,
    f: impl FnOnce(&mut ScreenSession) -> TaskActionResponse,
) -> TaskActionResponse {
    let mut registry = lock_sessions();
    match registry.sessions.get_mut(&handle) {
        Some(session) => f(session),
        None => TaskActionResponse::failure(format!("unknown screen handle {handle}")),
    }
}

fn parse_task_id(id: &str) -> Option<TaskId> {
    Uuid::parse_str(id.trim()).ok()
}

fn clamp_count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, filter_set, init_logging, ping, screen_close, screen_open, task_add,
        task_count, task_delete, task_toggle, tasks_clear_all, tasks_visible, theme_current,
        theme_toggle,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn screen_sessions_are_isolated() {
        let first = screen_open();
        let second = screen_open();
        assert_ne!(first, second);

        assert!(task_add(first, "only in first".to_string()).ok);
        assert_eq!(task_count(first).count, 1);
        assert_eq!(task_count(second).count, 0);

        assert!(screen_close(first).ok);
        assert!(screen_close(second).ok);
    }

    #[test]
    fn closed_screen_handle_fails_softly() {
        let handle = screen_open();
        assert!(screen_close(handle).ok);

        let closed_again = screen_close(handle);
        assert!(!closed_again.ok);
        assert!(closed_again.message.contains("unknown handle"));

        let add = task_add(handle, "too late".to_string());
        assert!(!add.ok);
    }

    #[test]
    fn task_add_rejects_whitespace_only_text() {
        let handle = screen_open();

        let response = task_add(handle, "   ".to_string());
        assert!(!response.ok);
        assert!(response.task.is_none());
        assert_eq!(task_count(handle).count, 0);

        assert!(screen_close(handle).ok);
    }

    #[test]
    fn toggle_and_delete_round_trip_through_string_ids() {
        let handle = screen_open();

        let added = task_add(handle, "Buy milk".to_string());
        assert!(added.ok, "{}", added.message);
        let task = added.task.expect("successful add returns a snapshot");
        assert!(!task.completed);

        let toggled = task_toggle(handle, task.id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert!(toggled.task.expect("toggle returns a snapshot").completed);

        let deleted = task_delete(handle, task.id.clone());
        assert!(deleted.ok, "{}", deleted.message);

        let stale = task_delete(handle, task.id);
        assert!(!stale.ok);
        assert!(stale.message.contains("not found"));

        assert!(screen_close(handle).ok);
    }

    #[test]
    fn malformed_id_fails_softly() {
        let handle = screen_open();

        let response = task_toggle(handle, "not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid task id"));

        assert!(screen_close(handle).ok);
    }

    #[test]
    fn filter_set_drives_visible_tasks() {
        let handle = screen_open();

        let milk = task_add(handle, "Buy milk".to_string())
            .task
            .expect("add should succeed");
        task_add(handle, "Walk dog".to_string());
        assert!(task_toggle(handle, milk.id).ok);

        assert!(filter_set(handle, "active".to_string()).ok);
        let active = tasks_visible(handle);
        assert_eq!(active.filter, "active");
        assert_eq!(active.items.len(), 1);
        assert_eq!(active.items[0].text, "Walk dog");

        assert!(filter_set(handle, "completed".to_string()).ok);
        let completed = tasks_visible(handle);
        assert_eq!(completed.items.len(), 1);
        assert_eq!(completed.items[0].text, "Buy milk");

        let rejected = filter_set(handle, "urgent".to_string());
        assert!(!rejected.ok);
        assert_eq!(tasks_visible(handle).filter, "completed");

        assert!(screen_close(handle).ok);
    }

    #[test]
    fn clear_all_reports_removed_count() {
        let handle = screen_open();

        task_add(handle, "one".to_string());
        task_add(handle, "two".to_string());

        let cleared = tasks_clear_all(handle);
        assert!(cleared.ok);
        assert_eq!(cleared.removed, 2);
        assert!(tasks_visible(handle).items.is_empty());

        let empty_clear = tasks_clear_all(handle);
        assert!(empty_clear.ok);
        assert_eq!(empty_clear.removed, 0);

        assert!(screen_close(handle).ok);
    }

    #[test]
    fn theme_toggle_flips_between_light_and_dark() {
        let handle = screen_open();

        assert_eq!(theme_current(handle).theme, "light");
        assert_eq!(theme_toggle(handle).theme, "dark");
        assert_eq!(theme_toggle(handle).theme, "light");

        assert!(screen_close(handle).ok);
    }
}
