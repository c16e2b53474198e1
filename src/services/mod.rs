//! Service functions coordinating repositories and the rules engine. Routes
//! stay thin: every permission gate and validation decision lives here or in
//! the rules engine itself.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::domain::EnumParseError;
use crate::domain::rules::RuleError;
use crate::forms::FormError;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod catalog;
pub mod jobs;
pub mod settings;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<EnumParseError> for ServiceError {
    fn from(err: EnumParseError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Rule(rule) => ServiceError::Rule(rule),
            other => ServiceError::Validation(other.to_string()),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Rule(RuleError::PermissionDenied) => StatusCode::FORBIDDEN,
            ServiceError::Rule(_) | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ServiceError::Repository(RepositoryError::ConstraintViolation(_)) => {
                StatusCode::CONFLICT
            }
            ServiceError::Repository(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Service failure: {self}");
            return HttpResponse::build(status).json(json!({ "error": "internal server error" }));
        }
        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }
}

/// Rejects the request unless the user holds the given role.
pub(crate) fn ensure_role(
    user: &AuthenticatedUser,
    role: crate::domain::user::UserRole,
) -> ServiceResult<()> {
    if user.role == Some(role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden("Permission denied".to_string()))
    }
}
