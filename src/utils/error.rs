use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Provider request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required parameter: {field}")]
    MissingParameter { field: String },

    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Provider returned status {status}")]
    ProviderStatus { status: u16 },

    #[error("Unexpected provider payload: {message}")]
    ProviderSchemaError { message: String },
}

pub type Result<T> = std::result::Result<T, LookupError>;

impl LookupError {
    /// HTTP 狀態碼
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter { .. } | Self::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::ApiError(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::ApiError(_)
            | Self::ProviderStatus { .. }
            | Self::ProviderSchemaError { .. }
            | Self::SerializationError(_) => StatusCode::BAD_GATEWAY,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } | Self::InvalidParameter { .. } => {
                "invalid_request_error"
            }
            Self::ApiError(_)
            | Self::ProviderStatus { .. }
            | Self::ProviderSchemaError { .. }
            | Self::SerializationError(_) => "api_error",
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "internal_error",
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("❌ Lookup failed: {} (status {})", self, status);
        } else {
            tracing::debug!("Rejected lookup request: {}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                message: self.client_message(),
                r#type: self.error_type().to_string(),
                code: status.as_u16(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        let err = LookupError::MissingParameter {
            field: "zip".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "invalid_request_error");
        assert_eq!(err.client_message(), "Missing required parameter: zip");
    }

    #[test]
    fn test_provider_errors_map_to_bad_gateway() {
        let err = LookupError::ProviderStatus { status: 500 };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_type(), "api_error");

        let err = LookupError::ProviderSchemaError {
            message: "missing 'result'".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let err = LookupError::ConfigError {
            message: "secret path /etc/provider.key".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Internal server error");
    }
}
