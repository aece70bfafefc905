//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Every body carries `message`; server errors add `error`, validation
//! failures add `errors`.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::{ValidationError, ValidationErrors};

/// What the handler was doing when it failed; picks the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Write operation implied by a request method.
    pub fn for_method(method: &Method) -> Self {
        if method == Method::PUT || method == Method::PATCH {
            Self::Update
        } else if method == Method::DELETE {
            Self::Delete
        } else if method == Method::POST {
            Self::Create
        } else {
            Self::Read
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Self::Update => "Server could not find a requested post to update",
            Self::Delete => "Server could not find a requested post to delete",
            Self::Read | Self::Create => "Server could not find a requested post",
        }
    }
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationErrors),

    /// Request body was not a JSON object (400)
    MalformedBody { op: Operation, detail: String },

    /// Query string could not be read (400)
    InvalidQuery { detail: String },

    /// Post not found (404)
    NotFound(Operation),

    /// Database error (500, logged)
    Database { op: Operation, source: sqlx::Error },
}

impl ApiError {
    /// Attach the failing operation to a repository error.
    pub fn from_db(op: Operation, err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => Self::NotFound(op),
            DbError::Sqlx(source) => Self::Database { op, source },
        }
    }

    /// Repository error mapper for `map_err`.
    pub fn db(op: Operation) -> impl FnOnce(DbError) -> Self {
        move |err| Self::from_db(op, err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody { .. } | Self::InvalidQuery { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!({
                "message": errors.to_string(),
                "errors": errors.messages(),
            }),
            Self::MalformedBody { op, detail } => json!({
                "message": format!(
                    "Server could not {} post because there are missing data from client",
                    op.verb()
                ),
                "error": detail,
            }),
            Self::InvalidQuery { detail } => json!({
                "message": "Server could not read post because the query string is invalid",
                "error": detail,
            }),
            Self::NotFound(op) => json!({
                "message": op.not_found_message(),
            }),
            Self::Database { op, source } => {
                tracing::error!(operation = op.verb(), "Database error: {}", source);
                json!({
                    "message": format!(
                        "Server could not {} post because database connection",
                        op.verb()
                    ),
                    "error": source.to_string(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.into())
    }
}
