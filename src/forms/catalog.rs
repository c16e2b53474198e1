use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::catalog::{NewPaperSize, NewPaperType, NewProductType, PaperSeries};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
pub struct NewProductTypeForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<&NewProductTypeForm> for NewProductType {
    fn from(form: &NewProductTypeForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            description: form.description.clone(),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct NewPaperTypeForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<&NewPaperTypeForm> for NewPaperType {
    fn from(form: &NewPaperTypeForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            description: form.description.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct CompatibleWeightsParams {
    pub paper_type_id: i32,
}

/// Payload for creating a custom paper size, standalone or inline on the job
/// form. Dimensions arrive as the strings the dashboard inputs produce.
#[derive(Clone, Deserialize, Validate)]
pub struct CustomSizeForm {
    #[serde(default)]
    pub name: String,
    pub width_mm: String,
    pub height_mm: String,
    pub weight_id: i32,
}

fn parse_dimension(value: &str, field: &'static str) -> Result<Decimal, FormError> {
    let parsed: Decimal = value
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidDimension(field))?;
    if parsed <= Decimal::ZERO {
        return Err(FormError::InvalidDimension(field));
    }
    // Normalized so "85.50" and "85.5" compare (and store) identically.
    Ok(parsed.normalize())
}

impl TryFrom<&CustomSizeForm> for NewPaperSize {
    type Error = FormError;

    fn try_from(form: &CustomSizeForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.name.trim().to_string(),
            series: PaperSeries::Other,
            width_mm: parse_dimension(&form.width_mm, "width_mm")?,
            height_mm: parse_dimension(&form.height_mm, "height_mm")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(width: &str, height: &str) -> CustomSizeForm {
        CustomSizeForm {
            name: String::new(),
            width_mm: width.to_string(),
            height_mm: height.to_string(),
            weight_id: 1,
        }
    }

    #[test]
    fn dimensions_are_normalized() {
        let size = NewPaperSize::try_from(&form("85.50", "55.00")).expect("form converts");
        assert_eq!(size.width_mm.to_string(), "85.5");
        assert_eq!(size.height_mm.to_string(), "55");
        assert_eq!(size.series, PaperSeries::Other);
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        assert!(NewPaperSize::try_from(&form("0", "55")).is_err());
        assert!(NewPaperSize::try_from(&form("nope", "55")).is_err());
        assert!(NewPaperSize::try_from(&form("-10", "55")).is_err());
    }
}
