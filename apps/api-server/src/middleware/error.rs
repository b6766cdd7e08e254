//! Error handling middleware - RFC 7807 compliant responses.

use std::fmt;
use std::time::Duration;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use techhub_core::contact::ContactError;
use techhub_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    TooManyRequests(Duration),
    /// A required integration is not configured; the detail names it for the logs.
    Misconfigured(&'static str),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::TooManyRequests(wait) => {
                write!(f, "Too many requests, retry in {}ms", wait.as_millis())
            }
            AppError::Misconfigured(what) => write!(f, "Server configuration error: {}", what),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Whole seconds, rounded up, never zero.
    fn retry_after_secs(wait: &Duration) -> u64 {
        let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
        secs.max(1)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Misconfigured(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(detail) => {
                HttpResponse::NotFound().json(ErrorResponse::not_found(detail))
            }
            AppError::BadRequest(detail) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail))
            }
            AppError::TooManyRequests(wait) => {
                let secs = Self::retry_after_secs(wait);
                HttpResponse::TooManyRequests()
                    .insert_header(("Retry-After", secs.to_string()))
                    .json(ErrorResponse::too_many_requests(secs))
            }
            AppError::Misconfigured(what) => {
                tracing::error!(missing = what, "Server configuration error");
                HttpResponse::InternalServerError()
                    .json(ErrorResponse::internal_error().with_detail("Server configuration error"))
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                HttpResponse::InternalServerError().json(ErrorResponse::internal_error())
            }
        }
    }
}

// Conversion from domain errors
impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::BotDetected => AppError::BadRequest("Bot detected".to_string()),
            ContactError::MissingFields(_) | ContactError::InvalidEmail => {
                AppError::BadRequest(err.to_string())
            }
            ContactError::Delivery(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_errors_map_to_status() {
        let bot: AppError = ContactError::BotDetected.into();
        assert_eq!(bot.status_code(), StatusCode::BAD_REQUEST);

        let missing: AppError = ContactError::MissingFields(vec!["email"]).into();
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

        let delivery: AppError =
            ContactError::Delivery(techhub_core::ports::MailError::Transport("down".into())).into();
        assert_eq!(delivery.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        assert_eq!(AppError::retry_after_secs(&Duration::from_millis(200)), 1);
        assert_eq!(AppError::retry_after_secs(&Duration::from_millis(2500)), 3);
        assert_eq!(AppError::retry_after_secs(&Duration::ZERO), 1);
    }
}
