use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownRecord { .. } | ValidationError::UnknownPrayer(_) => {
                Self::not_found(err.to_string())
            }
            _ => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Rejections raised by the widget forms and the date handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid date key '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("date {0} is outside the tracked range")]
    OutOfRange(String),

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("{field} must be {rule}")]
    InvalidValue {
        field: &'static str,
        rule: &'static str,
    },

    #[error("unknown {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },

    #[error("no {kind} with id '{id}'")]
    UnknownRecord { kind: &'static str, id: String },

    #[error("no prayer at index {0}")]
    UnknownPrayer(usize),

    #[error("prayer must be marked as prayed before setting its time")]
    NotPrayed,
}
