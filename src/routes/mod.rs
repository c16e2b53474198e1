//! HTTP handlers: thin JSON glue over the service layer.

use validator::Validate;

use crate::services::ServiceError;

pub mod auth;
pub mod catalog;
pub mod jobs;
pub mod settings;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Runs declarative form validation, mapping failures to a 400.
pub(crate) fn validate_form(form: &impl Validate) -> Result<(), ServiceError> {
    form.validate()
        .map_err(|e| ServiceError::Validation(e.to_string()))
}
