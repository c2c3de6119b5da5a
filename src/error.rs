use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use leptos::logging::error;
use thiserror::Error;

use crate::models::message::{ErrorBody, FieldErrors};

pub const REVIEW_NOT_FOUND: &str = "Review couldn't be found";
pub const SPOT_NOT_FOUND: &str = "Spot couldn't be found";
pub const FORBIDDEN: &str = "Forbidden";
pub const IMAGE_QUOTA_REACHED: &str = "Maximum number of images for this review was reached";
pub const DUPLICATE_REVIEW: &str = "User already has a review for this spot";
pub const INVALID_BODY: &str = "Request body must be a JSON object with the expected fields";

/// Failure of an API request. Each variant maps to one status code and a
/// JSON [`ErrorBody`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Bad Request")]
    Validation(FieldErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn review_not_found() -> Self {
        ApiError::NotFound(REVIEW_NOT_FOUND.to_string())
    }

    pub fn spot_not_found() -> Self {
        ApiError::NotFound(SPOT_NOT_FOUND.to_string())
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(FORBIDDEN.to_string())
    }

    /// Validation failure on a single field.
    pub fn field(name: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(name.to_string(), message.to_string());
        ApiError::Validation(errors)
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(errors) => ErrorBody::with_errors(self.to_string(), errors.clone()),
            ApiError::Database(_) | ApiError::Internal(_) => ErrorBody::new("Internal server error"),
            other => ErrorBody::new(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self, ApiError::Database(_) | ApiError::Internal(_)) {
            error!("[API ERROR] {}", self);
        }
        HttpResponse::build(self.status_code()).json(self.body())
    }
}
