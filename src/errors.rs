use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::config::ConfigError;
use crate::podme::PodmeError;

pub const ACCESS_DENIED_BODY: &str = "Access denied!";

/// Application-wide error types
#[derive(Debug)]
pub enum AppError {
    /// Wrong or missing shared secret. Carries the configured denial status.
    AccessDenied { status: u16 },
    InvalidInput { field: String, message: String },

    // Upstream errors
    Upstream(PodmeError),

    // System errors
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::AccessDenied { .. } => write!(f, "{}", ACCESS_DENIED_BODY),
            AppError::InvalidInput { field, message } => write!(f, "Invalid {}: {}", field, message),
            AppError::Upstream(err) => write!(f, "Upstream request failed: {}", err),
            AppError::Configuration(message) => write!(f, "System configuration error: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Upstream(err) => Some(err),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AccessDenied { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::FORBIDDEN)
            }
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Log detailed error information for debugging
        match self {
            AppError::Upstream(_) | AppError::Configuration(_) => {
                log::error!("Server error: {}", self);
            }
            AppError::AccessDenied { .. } => {
                log::warn!("Rejected feed request with bad secret");
            }
            AppError::InvalidInput { .. } => {
                log::info!("Client error: {}", self);
            }
        }

        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn invalid_input(field: &str, message: &str) -> Self {
        AppError::InvalidInput {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<PodmeError> for AppError {
    fn from(err: PodmeError) -> Self {
        AppError::Upstream(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    fn body_of(err: &AppError) -> String {
        let bytes = err.error_response().into_body().try_into_bytes().unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_access_denied_uses_configured_status() {
        let err = AppError::AccessDenied { status: 300 };
        assert_eq!(err.status_code().as_u16(), 300);
        assert_eq!(body_of(&err), "Access denied!");

        let err = AppError::AccessDenied { status: 403 };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_upstream_errors_are_server_errors() {
        let err = AppError::from(PodmeError::Status {
            path: "/episode/9".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(&err), "Upstream request failed: /episode/9 returned 404 Not Found");
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = AppError::invalid_input("slug", "must not be empty");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(&err), "Invalid slug: must not be empty");
    }
}
