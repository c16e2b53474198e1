//! Response payloads returned by the API routes.

pub mod auth;
pub mod catalog;
pub mod jobs;
