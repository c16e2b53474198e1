//! Request payload definitions backing the API routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::EnumParseError;
use crate::domain::rules::RuleError;

pub mod auth;
pub mod catalog;
pub mod jobs;
pub mod settings;

#[derive(Debug, Error)]
/// Errors that can occur when converting submitted payloads into domain data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    UnknownValue(#[from] EnumParseError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    #[error("{0} must be a positive number")]
    InvalidDimension(&'static str),

    #[error("{0} is invalid")]
    InvalidValue(&'static str),
}
