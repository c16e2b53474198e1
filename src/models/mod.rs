//! Database models shared across the repository layer.

use rust_decimal::Decimal;

#[cfg(feature = "server")]
pub mod auth;
pub mod catalog;
#[cfg(feature = "server")]
pub mod config;
pub mod job;
pub mod settings;
pub mod user;

/// Re-parses a decimal column stored as TEXT. Stored values are written from
/// validated decimals, so this applies the same silent-zero fallback the
/// rules engine uses for cost input rather than failing the whole row.
pub(crate) fn parse_decimal(value: &str) -> Decimal {
    value.trim().parse().unwrap_or(Decimal::ZERO)
}
