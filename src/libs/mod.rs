//! Core library modules for the todomvc service.
//!
//! - **Domain**: the todo record and its status ([`todo`])
//! - **Errors**: the error taxonomy mapped to HTTP statuses ([`error`])
//! - **Configuration**: layered settings and the data directory ([`config`], [`data_storage`])
//! - **Messaging**: user-facing text and output macros ([`messages`])

pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod todo;
