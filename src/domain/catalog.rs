use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::EnumParseError;

/// Paper size family.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaperSeries {
    #[serde(rename = "A")]
    IsoA,
    #[serde(rename = "B")]
    IsoB,
    #[serde(rename = "NA")]
    NorthAmerican,
    #[serde(rename = "OTHER")]
    Other,
}

impl PaperSeries {
    pub fn as_str(self) -> &'static str {
        match self {
            PaperSeries::IsoA => "A",
            PaperSeries::IsoB => "B",
            PaperSeries::NorthAmerican => "NA",
            PaperSeries::Other => "OTHER",
        }
    }
}

impl Display for PaperSeries {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaperSeries {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(PaperSeries::IsoA),
            "B" => Ok(PaperSeries::IsoB),
            "NA" => Ok(PaperSeries::NorthAmerican),
            "OTHER" => Ok(PaperSeries::Other),
            other => Err(EnumParseError::new("paper series", other)),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductType {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewProductType {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaperType {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewPaperType {
    pub name: String,
    pub description: String,
}

/// Paper weight in grams per square metre.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaperWeight {
    pub id: i32,
    pub gsm: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaperSize {
    pub id: i32,
    pub name: String,
    pub series: PaperSeries,
    pub width_mm: Decimal,
    pub height_mm: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PaperSize {
    /// Display string like `210×297mm`.
    pub fn dimensions(&self) -> String {
        format!("{}×{}mm", self.width_mm, self.height_mm)
    }
}

/// A size to be created inline from the job form. Custom sizes always land in
/// the OTHER series and are linked to the paper weight they were entered for.
#[derive(Clone, Debug)]
pub struct NewPaperSize {
    pub name: String,
    pub series: PaperSeries,
    pub width_mm: Decimal,
    pub height_mm: Decimal,
}

/// The paper types, weights and sizes configured as valid for one product
/// type. Lists are empty when the product type has no configuration yet.
#[derive(Clone, Debug, Serialize, PartialEq, Default)]
pub struct ProductSpecification {
    pub paper_types: Vec<PaperType>,
    pub paper_weights: Vec<PaperWeight>,
    pub paper_sizes: Vec<PaperSize>,
}
