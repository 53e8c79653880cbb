//! Error types for the todo client.
//!
//! # Design
//! `ApiError` covers everything between building a request and decoding a
//! response. Toggle and delete failures collapse into `Server`, whose message
//! is fixed; the status travels alongside for logging. `ViewError` is the
//! render-time lookup failure and `AppError` is what the controller returns.

use thiserror::Error;

use crate::types::{TodoId, UserId};

/// Errors produced by the codec and the transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for a single-resource read.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A partial update or delete was rejected by the server.
    #[error("server error")]
    Server { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors raised while building the view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    /// A todo references a user that was not fetched.
    #[error("todo {todo_id} references unknown user {user_id}")]
    UnknownUser { todo_id: TodoId, user_id: UserId },
}

/// Errors surfaced by the interaction controller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    View(#[from] ViewError),

    /// One of the startup fetch workers did not finish normally.
    #[error("startup fetch of {0} aborted")]
    Startup(&'static str),
}
