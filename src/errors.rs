use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

/// Rejections at the write/query boundary. The calculators never produce these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("habit '{0}' not found")]
    UnknownHabit(String),

    #[error("date {date} is before habit '{habit_id}' was created on {created_at}")]
    BeforeCreation {
        habit_id: String,
        date: NaiveDate,
        created_at: NaiveDate,
    },

    #[error("value must be a finite, non-negative number (got {0})")]
    InvalidValue(f64),

    #[error("invalid date '{0}', expected YYYY-MM-DD or RFC 3339")]
    InvalidDate(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("invalid habit: {0}")]
    InvalidHabit(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),

    #[error("invalid HABIT_WEEK_START '{0}', expected monday or sunday")]
    InvalidWeekStart(String),
}

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
            ValidationError::UnknownHabit(_) => Self::not_found(err.to_string()),
            _ => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
