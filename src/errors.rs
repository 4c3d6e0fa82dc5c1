use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    // The generic context reaches the caller; the detail is only logged.
    #[error("{context}")]
    Database {
        context: &'static str,
        detail: String,
    },

    #[error("An unexpected error occurred")]
    Internal(String),
}

impl AppError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn database(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Database {
            context,
            detail: err.to_string(),
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, "Invalid Parameter"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            AppError::Database { context, detail } => {
                error!(%context, %detail, "database operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database Error")
            }
            AppError::Internal(detail) => {
                error!(%detail, "unexpected error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        let body = json!({
            "error": kind,
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_error_hides_detail_from_message() {
        let err = AppError::database("Failed to fetch posts", "io: permission denied");
        assert_eq!(err.to_string(), "Failed to fetch posts");
    }

    #[test]
    fn internal_error_message_is_generic() {
        let err = AppError::internal("stack trace soup");
        assert_eq!(err.to_string(), "An unexpected error occurred");
    }
}
