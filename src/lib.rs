//! # todomvc - Todo MVC Service
//!
//! A minimal task-list HTTP backend. Clients list, filter, create, update
//! and bulk-delete short text items ("todos") that are persisted to a single
//! JSON file.
//!
//! ## Features
//!
//! - **Persisted Store**: Concurrency-safe todo list with write-then-rename persistence
//! - **Exact Routing**: Static `(method, path)` dispatch table with one error boundary
//! - **HTTP Service**: axum transport with graceful shutdown
//! - **Configuration**: CLI flags, environment, `.env` and `config.json` layers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todomvc::api::TodoService;
//! use todomvc::libs::config::Options;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = TodoService::start(&Options::new("todo.json", 8080)).await?;
//!     tokio::signal::ctrl_c().await?;
//!     service.stop().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
