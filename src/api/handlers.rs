//! Endpoint handlers.
//!
//! | Method | Path         | Handler              |
//! |--------|--------------|----------------------|
//! | GET    | `/`          | [`hello`]            |
//! | GET    | `/todo/list` | [`list_todos`]       |
//! | POST   | `/todo`      | [`add_todo`]         |
//! | PUT    | `/todo`      | [`update_todo`]      |
//! | DELETE | `/todo`      | [`bulk_delete_todos`]|
//!
//! Handlers validate input and call the store. They never format error
//! bodies; errors are returned to the dispatcher.

use super::request::{Reply, Request};
use super::router::{AppContext, Router};
use crate::libs::error::{Result, TodoError};
use crate::libs::messages::Message;
use crate::libs::todo::{is_blank, Todo, TodoStatus};
use axum::http::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;

/// Builds the dispatcher with every todo endpoint registered.
pub fn router(context: AppContext) -> Router {
    Router::new(context)
        .route(Method::GET, "/", hello)
        .route(Method::GET, "/todo/list", list_todos)
        .route(Method::POST, "/todo", add_todo)
        .route(Method::PUT, "/todo", update_todo)
        .route(Method::DELETE, "/todo", bulk_delete_todos)
}

/// Request body of `POST /todo` and `PUT /todo`. Every field is optional at
/// the decoding stage so that missing values surface as validation errors.
#[derive(Debug, Default, Deserialize)]
pub struct TodoPayload {
    pub id: Option<i64>,
    pub content: Option<String>,
    pub status: Option<String>,
}

fn decode<T: DeserializeOwned>(request: &Request) -> Result<T> {
    serde_json::from_slice(&request.body).map_err(|e| TodoError::BadRequest(e.to_string()))
}

pub fn hello(_context: &AppContext, _request: &Request) -> Result<Reply> {
    Ok(Reply::text(Message::Greeting.to_string()))
}

/// Lists todos, filtered by the first `status` query value when it names a
/// legal status. Unknown values return the full list.
pub fn list_todos(context: &AppContext, request: &Request) -> Result<Reply> {
    let status = request.query_first("status").and_then(TodoStatus::parse);
    Reply::json(&context.store.read_filtered(status))
}

pub fn add_todo(context: &AppContext, request: &Request) -> Result<Reply> {
    let payload: TodoPayload = decode(request)?;
    let content = payload.content.unwrap_or_default();
    if is_blank(&content) {
        return Err(TodoError::Validation(Message::ContentEmpty));
    }

    let todo = context.store.add(&content)?;
    Reply::json(&todo)
}

pub fn update_todo(context: &AppContext, request: &Request) -> Result<Reply> {
    let payload: TodoPayload = decode(request)?;

    let id = payload.id.ok_or(TodoError::Validation(Message::IdMissing))?;
    let status = payload
        .status
        .as_deref()
        .and_then(TodoStatus::parse)
        .ok_or(TodoError::Validation(Message::IllegalStatus))?;
    let content = payload
        .content
        .filter(|content| !is_blank(content))
        .ok_or(TodoError::Validation(Message::ContentEmpty))?;

    context.store.update(&Todo { id, content, status })?;
    Ok(Reply::ok())
}

/// Deletes every todo named by a repeated `id` query parameter. Values that
/// are not integers are skipped.
pub fn bulk_delete_todos(context: &AppContext, request: &Request) -> Result<Reply> {
    let ids: HashSet<i64> = request.query_values("id").filter_map(|value| value.parse().ok()).collect();
    context.store.bulk_delete(&ids)?;
    Ok(Reply::ok())
}
