use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Application error taxonomy, mapped to HTTP status codes at the boundary.
///
/// 4xx variants carry a stable, user-facing message. 5xx variants wrap the
/// upstream failure; the wire body stays generic and the detail goes to the
/// server log only.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Resource conflict (e.g. duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Passage retrieval (embedding call or index search) failed
    #[error("Context retrieval failed")]
    Retrieval(#[source] anyhow::Error),

    /// Answer generation call failed
    #[error("Answer generation failed")]
    Generation(#[source] anyhow::Error),

    /// Speech-to-text call failed
    #[error("Transcription failed")]
    Transcription(#[source] anyhow::Error),

    /// User store unavailable
    #[error("User store unavailable")]
    Storage(#[source] anyhow::Error),

    /// Anything else is a bug
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Retrieval(_) | AppError::Generation(_) | AppError::Transcription(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, detail = ?self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
