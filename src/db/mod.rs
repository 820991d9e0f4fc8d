//! Persistence layer for todomvc.
//!
//! The service keeps its whole data set in a single JSON file owned by
//! [`todos::TodoStore`]. Nothing outside this module touches that file.

/// Concurrency-safe, file-backed todo store.
///
/// Handles loading the list at startup, snapshot reads, and the
/// add/update/bulk-delete mutations with write-then-rename persistence.
pub mod todos;
