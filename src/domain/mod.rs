//! Domain aggregates exposed by the job-management service layer.

use thiserror::Error;

pub mod analytics;
pub mod catalog;
pub mod job;
pub mod rules;
pub mod settings;
pub mod user;

/// Error produced when a string crossing an external boundary (database row,
/// request payload) matches no variant of a closed domain enumeration.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

impl EnumParseError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
