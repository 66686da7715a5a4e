use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const NO_FILE_UPLOADED: &str = "No file uploaded";
pub const EXTRACTION_FAILED: &str = "Could not extract text from PDF";

/// Failure side of an analysis request.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The `Display` text of every variant is exactly the user-facing message that
/// ends up under the `error` key of the JSON body.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request was missing something the endpoint requires.
    #[error("{0}")]
    InvalidInput(String),

    /// The upload parsed, but produced no usable text.
    #[error("{0}")]
    ExtractionFailed(String),

    /// Anything else: multipart read errors, extraction library errors, model failures.
    #[error("Failed to analyze resume: {0}")]
    Internal(String),
}

impl AppError {
    pub fn no_file() -> Self {
        AppError::InvalidInput(NO_FILE_UPLOADED.to_string())
    }

    pub fn no_text() -> Self {
        AppError::ExtractionFailed(EXTRACTION_FAILED.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::ExtractionFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(msg) => tracing::error!("Analysis error: {msg}"),
            other => tracing::info!("Rejected upload: {other}"),
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        assert_eq!(AppError::no_file().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::no_text().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::no_file().to_string(), "No file uploaded");
        assert_eq!(AppError::no_text().to_string(), "Could not extract text from PDF");
    }

    #[test]
    fn test_internal_error_is_prefixed() {
        let err = AppError::Internal("quota exceeded".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to analyze resume: quota exceeded");
    }

    #[tokio::test]
    async fn test_into_response_writes_error_body() {
        let response = AppError::no_file().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "No file uploaded" }));
    }
}
