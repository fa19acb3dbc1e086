use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use derive_more::Display;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    ValidationError(String),
    NotFound(String),
    InternalError(String),
    ConfigError(String),
}

// Implement Display manually instead of using derive
impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// JSON body for failed API calls. The `error` key matches the field the
/// publish handler looks for in a reply.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

/// Failure of the HTTP exchange itself, before any reply could be read as a
/// publish result.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum TransportError {
    #[display("network error: {_0}")]
    Network(String),
    #[display("unexpected status {_0}")]
    Status(u16),
    #[display("malformed response: {_0}")]
    Malformed(String),
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::Status(status.as_u16()),
            None if err.is_decode() => TransportError::Malformed(err.to_string()),
            None => TransportError::Network(err.to_string()),
        }
    }
}

#[derive(Debug, Display, Clone, PartialEq)]
pub enum PublishError {
    #[display("server reported: {_0}")]
    ServerReported(String),
    #[display("transport failed: {_0}")]
    Transport(TransportError),
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PublishError::ServerReported(_) => None,
            PublishError::Transport(err) => Some(err),
        }
    }
}

impl From<TransportError> for PublishError {
    fn from(err: TransportError) -> Self {
        PublishError::Transport(err)
    }
}
