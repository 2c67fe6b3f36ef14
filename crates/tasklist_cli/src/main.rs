//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasklist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tasklist_core::{FilterMode, TaskListStore};

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    let mut store = TaskListStore::new();
    let task = match store.add("smoke-check task") {
        Ok(task) => task,
        Err(err) => {
            eprintln!("tasklist_core add failed: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = store.toggle_complete(task.id) {
        eprintln!("tasklist_core toggle failed: {err}");
        std::process::exit(1);
    }
    store.set_filter(FilterMode::Completed);
    println!("tasklist_core visible_completed={}", store.visible_tasks().len());
}
