//! Error types for the dashboard server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use therm_proto::{ErrorResponse, ProtoError};

/// Result type alias for dashboard operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur in the dashboard server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed validation; the message is sent to the client.
    #[error("{0}")]
    Validation(String),

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] therm_store::Error),

    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ProtoError> for ApiError {
    fn from(err: ProtoError) -> Self {
        Self::Validation(err.message().to_owned())
    }
}

impl IntoResponse for ApiError {
    /// Map to the wire error contract.
    ///
    /// Validation failures carry their message at 400. Everything else
    /// is a 500 with a generic body; the store distinguishes only
    /// "database unavailable" from "internal server error", and the full
    /// error is logged server-side rather than leaked to the client.
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.as_str()),
            Self::Store(err) if err.is_unavailable() => {
                error!(error = %err, "Store unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
            }
            Self::Store(_) | Self::BindFailed(_, _) | Self::Internal(_) => {
                error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
