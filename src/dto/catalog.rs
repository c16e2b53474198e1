use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::catalog::{PaperSeries, PaperSize};

/// A paper size with its precomputed display dimensions.
#[derive(Serialize)]
pub struct PaperSizeResponse {
    pub id: i32,
    pub name: String,
    pub series: PaperSeries,
    pub width_mm: Decimal,
    pub height_mm: Decimal,
    pub dimensions: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<PaperSize> for PaperSizeResponse {
    fn from(size: PaperSize) -> Self {
        let dimensions = size.dimensions();
        Self {
            id: size.id,
            name: size.name,
            series: size.series,
            width_mm: size.width_mm,
            height_mm: size.height_mm,
            dimensions,
            created_at: size.created_at,
            updated_at: size.updated_at,
        }
    }
}

/// Result of a custom-size request; `message` is set when an existing size
/// with the same dimensions was reused instead of creating a new one.
#[derive(Serialize)]
pub struct CustomSizeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub size: PaperSizeResponse,
}
