//! Unified error handling for the block service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::block::BlockError;

/// Application-level error type for HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Loading or processing a block failed.
    #[error("Block error: {0}")]
    Block(#[from] BlockError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Block(BlockError::Load(_) | BlockError::Process(_)) => StatusCode::BAD_GATEWAY,
            Self::Block(BlockError::TagRejected(_) | BlockError::AdjustRejected(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Block(BlockError::AlreadyProcessing) => StatusCode::CONFLICT,
            Self::NotFound(_) | Self::Block(BlockError::MissingOrderId) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Block(BlockError::Load(_) | BlockError::Process(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Block request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Block(e) => e.user_message().to_string(),
            _ => self.to_string(),
        };

        (self.status(), message).into_response()
    }
}
