// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling each group's `watch` / `exclude` glob patterns.
//! - Wiring up a cross-platform filesystem watcher (`notify`) on the source
//!   root.
//! - (Optionally) skipping changes whose file content did not actually change.
//!
//! It does **not** run tasks; it only turns filesystem changes into
//! group-level triggers for the engine.

pub mod event_handler;
pub mod hash;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use event_handler::{groups_for_paths, is_relevant_event};
pub use hash::{HashStore, MemoryHashStore, compute_file_hash};
pub use patterns::{WatchProfile, build_profiles};
pub use watcher::{WatcherHandle, spawn_watcher};
