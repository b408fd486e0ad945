//! Typed API errors and their wire form.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bingo_core::GameError;
use serde::Serialize;
use tracing::warn;

/// Error returned by every handler; serializes as
/// `{"error": {"code": …, "message": …}}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: &'a str,
}

impl ApiError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let (status, code) = match &err {
            GameError::SessionNotFound { .. } => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            GameError::BoardNotFound { .. } => (StatusCode::NOT_FOUND, "BOARD_NOT_FOUND"),
            GameError::PoolUnavailable { .. } => (StatusCode::NOT_FOUND, "POOL_UNAVAILABLE"),
            GameError::Unauthorized => (StatusCode::FORBIDDEN, "UNAUTHORIZED"),
            GameError::UnknownWord { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_WORD"),
            GameError::WordNotOnBoard { .. } => (StatusCode::BAD_REQUEST, "WORD_NOT_ON_BOARD"),
            GameError::NoRerollsRemaining => (StatusCode::CONFLICT, "NO_REROLLS_REMAINING"),
            GameError::PoolExhausted => (StatusCode::CONFLICT, "POOL_EXHAUSTED"),
            GameError::InsufficientPool { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_POOL")
            }
            GameError::InvalidBoardSize { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_BOARD_SIZE")
            }
        };
        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(code = self.code, message = %self.message, "request failed");
        }
        let body = Json(ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: &self.message,
            },
        });
        (self.status, body).into_response()
    }
}
