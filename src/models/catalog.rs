use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::EnumParseError;
use crate::domain::catalog::{
    NewPaperSize as DomainNewPaperSize, NewPaperType as DomainNewPaperType,
    NewProductType as DomainNewProductType, PaperSize as DomainPaperSize,
    PaperType as DomainPaperType, PaperWeight as DomainPaperWeight,
    ProductType as DomainProductType,
};
use crate::models::parse_decimal;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_types)]
pub struct ProductType {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_types)]
pub struct NewProductType<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::paper_types)]
pub struct PaperType {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::paper_types)]
pub struct NewPaperType<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::paper_weights)]
pub struct PaperWeight {
    pub id: i32,
    pub gsm: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::paper_sizes)]
pub struct PaperSize {
    pub id: i32,
    pub name: String,
    pub series: String,
    pub width_mm: String,
    pub height_mm: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`PaperSize`]. Dimensions are serialized decimals.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::paper_sizes)]
pub struct NewPaperSize {
    pub name: String,
    pub series: String,
    pub width_mm: String,
    pub height_mm: String,
}

impl From<ProductType> for DomainProductType {
    fn from(row: ProductType) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProductType> for NewProductType<'a> {
    fn from(value: &'a DomainNewProductType) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_str(),
        }
    }
}

impl From<PaperType> for DomainPaperType {
    fn from(row: PaperType) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewPaperType> for NewPaperType<'a> {
    fn from(value: &'a DomainNewPaperType) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_str(),
        }
    }
}

impl From<PaperWeight> for DomainPaperWeight {
    fn from(row: PaperWeight) -> Self {
        Self {
            id: row.id,
            gsm: row.gsm,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<PaperSize> for DomainPaperSize {
    type Error = EnumParseError;

    fn try_from(row: PaperSize) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            series: row.series.parse()?,
            width_mm: parse_decimal(&row.width_mm),
            height_mm: parse_decimal(&row.height_mm),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&DomainNewPaperSize> for NewPaperSize {
    fn from(value: &DomainNewPaperSize) -> Self {
        Self {
            name: value.name.clone(),
            series: value.series.as_str().to_string(),
            width_mm: value.width_mm.to_string(),
            height_mm: value.height_mm.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::catalog::PaperSeries;

    #[test]
    fn paper_size_into_domain() {
        let now = chrono::Utc::now().naive_utc();
        let row = PaperSize {
            id: 3,
            name: "A4".to_string(),
            series: "A".to_string(),
            width_mm: "210".to_string(),
            height_mm: "297".to_string(),
            created_at: now,
            updated_at: now,
        };
        let domain: DomainPaperSize = row.try_into().expect("row should convert");
        assert_eq!(domain.series, PaperSeries::IsoA);
        assert_eq!(domain.width_mm, Decimal::from(210));
        assert_eq!(domain.dimensions(), "210×297mm");
    }

    #[test]
    fn custom_size_round_trips_dimensions() {
        let domain = DomainNewPaperSize {
            name: "Custom Size 1".to_string(),
            series: PaperSeries::Other,
            width_mm: Decimal::new(8550, 2),
            height_mm: Decimal::new(5500, 2),
        };
        let row: NewPaperSize = (&domain).into();
        assert_eq!(row.series, "OTHER");
        assert_eq!(row.width_mm, "85.50");
        assert_eq!(row.height_mm, "55.00");
    }
}
