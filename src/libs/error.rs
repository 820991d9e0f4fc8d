//! Error taxonomy shared by the store and the request layer.
//!
//! Every failure a request can hit is a [`TodoError`]. The dispatcher turns it
//! into a wire response through [`TodoError::status_code`]; nothing else in
//! the crate maps errors to HTTP.

use axum::http::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::messages::Message;

#[derive(Debug, Error)]
pub enum TodoError {
    /// A required field is missing or has an illegal value.
    #[error("{0}")]
    Validation(Message),

    /// An update targeted an id the store does not hold.
    #[error("Todo with ID {0} not found")]
    NotFound(i64),

    /// The request body could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    /// No handler is registered for the method and path.
    #[error("{}", Message::RouteNotFound)]
    RouteNotFound,

    /// Reading or writing the backing file failed.
    #[error("Todo store I/O failed: {0}")]
    Persistence(#[from] io::Error),

    #[error("Failed to serialize todo list: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file exists but does not hold a valid todo list.
    #[error("Todo store file {} is corrupt: {reason}", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    /// The id counter has reached `i64::MAX`.
    #[error("{}", Message::IdsExhausted)]
    IdsExhausted,
}

impl TodoError {
    /// HTTP status for this error.
    ///
    /// A missing todo is reported as a client error rather than `404`, so that
    /// `404` always means "no such route".
    pub fn status_code(&self) -> StatusCode {
        match self {
            TodoError::Validation(_) | TodoError::NotFound(_) | TodoError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TodoError::RouteNotFound => StatusCode::NOT_FOUND,
            TodoError::Persistence(_) | TodoError::Serialization(_) | TodoError::CorruptStore { .. }
            | TodoError::IdsExhausted => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type Result<T, E = TodoError> = std::result::Result<T, E>;
