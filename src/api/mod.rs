//! HTTP surface of the todo service.
//!
//! - [`request`]: transport-independent request/reply values
//! - [`router`]: exact `(method, path)` dispatch and the error boundary
//! - [`handlers`]: the five todo endpoints
//! - [`server`]: axum transport and service lifecycle

pub mod handlers;
pub mod request;
pub mod router;
pub mod server;

pub use request::{Reply, Request};
pub use router::{AppContext, Router};
pub use server::TodoService;
