//! Transport-independent request and reply values.
//!
//! The transport turns each HTTP exchange into a [`Request`] before dispatch
//! and turns the resulting [`Reply`] back into an HTTP response. Handlers
//! only ever see these two types, which keeps them callable from tests
//! without a socket.

use crate::libs::error::{Result, TodoError};
use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=UTF-8";

/// A parsed request: method, path, decoded query pairs and raw body.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    /// Query parameters in their original order. Keys may repeat.
    pub query: Vec<(String, String)>,
    pub body: Bytes,
}

impl Request {
    pub fn new(method: Method, path: &str) -> Self {
        Request {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Builds a request from the pieces the transport receives. The query
    /// string is form-urlencoded; an undecodable query counts as empty. The
    /// path is kept as sent, so `/todo%2Flist` does not match `/todo/list`.
    pub fn from_parts(method: Method, uri: &Uri, body: Bytes) -> Self {
        let query = Query::<Vec<(String, String)>>::try_from_uri(uri).map(|Query(pairs)| pairs).unwrap_or_default();
        Request {
            method,
            path: uri.path().to_string(),
            query,
            body,
        }
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// All values given for `name`, in order.
    pub fn query_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query.iter().filter(move |(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// First value given for `name`.
    pub fn query_first(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

/// What a handler answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    /// `200` with an empty body.
    pub fn ok() -> Self {
        Self::text(String::new())
    }

    /// `200` with a plain-text body.
    pub fn text(body: impl Into<String>) -> Self {
        Reply {
            status: StatusCode::OK,
            content_type: CONTENT_TYPE_TEXT,
            body: body.into(),
        }
    }

    /// `200` with `value` encoded as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Reply {
            status: StatusCode::OK,
            content_type: CONTENT_TYPE_JSON,
            body: serde_json::to_string(value)?,
        })
    }

    /// Plain-text error reply carrying the error's message.
    pub fn error(error: &TodoError) -> Self {
        let status = error.status_code();
        let mut body = error.to_string();
        if body.is_empty() {
            body = status.canonical_reason().map(|reason| format!("{} {}", status.as_u16(), reason)).unwrap_or_default();
        }
        Reply {
            status,
            content_type: CONTENT_TYPE_TEXT,
            body,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}
