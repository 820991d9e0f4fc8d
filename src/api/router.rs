//! Exact-match request dispatcher.
//!
//! The route table maps a `(method, path)` pair to a handler function. It is
//! filled once at startup and only read afterwards, so it is shared between
//! worker threads without locking.
//!
//! [`Router::dispatch`] is also the single place where errors become
//! responses: a missing route yields `404`, and any error a handler returns
//! is rendered through [`Router::reject`].

use super::request::{Reply, Request};
use crate::db::todos::TodoStore;
use crate::libs::error::{Result, TodoError};
use crate::libs::messages::Message;
use axum::http::Method;
use std::collections::HashMap;
use std::sync::Arc;

/// Dependencies handed to every handler.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<TodoStore>,
}

impl AppContext {
    pub fn new(store: Arc<TodoStore>) -> Self {
        AppContext { store }
    }
}

pub type Handler = fn(&AppContext, &Request) -> Result<Reply>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub method: Method,
    pub path: String,
}

impl Route {
    pub fn new(method: Method, path: &str) -> Self {
        Route {
            method,
            path: path.to_string(),
        }
    }
}

pub struct Router {
    context: AppContext,
    routes: HashMap<Route, Handler>,
}

impl Router {
    pub fn new(context: AppContext) -> Self {
        Router {
            context,
            routes: HashMap::new(),
        }
    }

    /// Registers `handler` for the exact `method` and `path`. A later
    /// registration for the same pair replaces the earlier one.
    pub fn route(mut self, method: Method, path: &str, handler: Handler) -> Self {
        self.routes.insert(Route::new(method, path), handler);
        self
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<Handler> {
        // Route owns its path, so the lookup key has to be built.
        self.routes.get(&Route::new(method.clone(), path)).copied()
    }

    pub fn dispatch(&self, request: &Request) -> Reply {
        let Some(handler) = self.resolve(&request.method, &request.path) else {
            tracing::debug!(method = %request.method, path = %request.path, "no route");
            return Reply::error(&TodoError::RouteNotFound);
        };

        match handler(&self.context, request) {
            Ok(reply) => reply,
            Err(e) => self.reject(&request.method, &request.path, &e),
        }
    }

    /// Logs a failed request and renders its error reply. Also used by the
    /// transport for requests whose body could not be read.
    pub fn reject(&self, method: &Method, path: &str, error: &TodoError) -> Reply {
        let message = Message::RequestFailed {
            method: method.to_string(),
            path: path.to_string(),
            error: error.to_string(),
        };
        if error.status_code().is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::debug!("{}", message);
        }
        Reply::error(error)
    }
}
