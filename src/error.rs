use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// A confidence, price or condition value could not be parsed
    #[error("Input format error: {0}")]
    InputFormat(String),
    /// Uploaded file is not an accepted image
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    /// Classifier request failed before a response arrived
    #[error("Classifier request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Classifier answered with a non-success status
    #[error("Classifier returned {status}: {message}")]
    UpstreamStatus { status: StatusCode, message: String },
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error came from the classifier round trip
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::UpstreamStatus { .. })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::InputFormat(_) => "input_format_error",
            Self::InvalidImage(_) => "invalid_image",
            Self::Transport(_) | Self::UpstreamStatus { .. } => "transport_error",
            Self::Config(_) => "config_error",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InputFormat(_) => StatusCode::BAD_REQUEST,
            Self::InvalidImage(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Transport(_) | Self::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": self.type_name(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::InputFormat("confidence 'abc' is not a number".to_string());
        assert_eq!(
            error.to_string(),
            "Input format error: confidence 'abc' is not a number"
        );

        let error = AppError::UpstreamStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "warming up".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Classifier returned 503 Service Unavailable: warming up"
        );
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(AppError::InputFormat("x".to_string()).type_name(), "input_format_error");
        assert_eq!(
            AppError::UpstreamStatus {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: String::new(),
            }
            .type_name(),
            "transport_error"
        );
    }

    #[test]
    fn test_is_transport() {
        assert!(AppError::UpstreamStatus {
            status: StatusCode::NOT_FOUND,
            message: String::new(),
        }
        .is_transport());
        assert!(!AppError::InvalidImage("bmp".to_string()).is_transport());
    }

    #[tokio::test]
    async fn test_error_response() {
        let response = AppError::InputFormat("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::UpstreamStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
