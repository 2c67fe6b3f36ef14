//! In-memory task-list store.
//!
//! # Responsibility
//! - Own the authoritative, append-ordered task collection and the active
//!   filter for one screen session.
//! - Provide deterministic derived views for rendering.
//!
//! # Invariants
//! - Single-writer, synchronous access; every mutation is atomic in effect.
//! - Rejected operations leave the collection and filter unchanged.

pub mod task_list;
