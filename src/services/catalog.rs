//! Product and paper taxonomy reads plus inline custom-size creation.

use crate::domain::catalog::{
    PaperSize, PaperType, PaperWeight, ProductSpecification, ProductType,
};
use crate::dto::catalog::CustomSizeResponse;
use crate::forms::catalog::{CustomSizeForm, NewPaperTypeForm, NewProductTypeForm};
use crate::repository::{CatalogReader, CatalogWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_product_types<R>(repo: &R) -> ServiceResult<Vec<ProductType>>
where
    R: CatalogReader + ?Sized,
{
    repo.list_product_types().map_err(ServiceError::from)
}

pub fn create_product_type<R>(form: &NewProductTypeForm, repo: &R) -> ServiceResult<ProductType>
where
    R: CatalogWriter + ?Sized,
{
    repo.create_product_type(&form.into())
        .map_err(ServiceError::from)
}

pub fn list_paper_types<R>(repo: &R) -> ServiceResult<Vec<PaperType>>
where
    R: CatalogReader + ?Sized,
{
    repo.list_paper_types().map_err(ServiceError::from)
}

pub fn create_paper_type<R>(form: &NewPaperTypeForm, repo: &R) -> ServiceResult<PaperType>
where
    R: CatalogWriter + ?Sized,
{
    repo.create_paper_type(&form.into())
        .map_err(ServiceError::from)
}

pub fn list_paper_weights<R>(repo: &R) -> ServiceResult<Vec<PaperWeight>>
where
    R: CatalogReader + ?Sized,
{
    repo.list_paper_weights().map_err(ServiceError::from)
}

pub fn list_paper_sizes<R>(repo: &R) -> ServiceResult<Vec<PaperSize>>
where
    R: CatalogReader + ?Sized,
{
    repo.list_paper_sizes().map_err(ServiceError::from)
}

/// Weights compatible with a paper type; the type itself must exist.
pub fn compatible_weights<R>(paper_type_id: i32, repo: &R) -> ServiceResult<Vec<PaperWeight>>
where
    R: CatalogReader + ?Sized,
{
    repo.get_paper_type_by_id(paper_type_id)?
        .ok_or(ServiceError::NotFound("Paper type"))?;
    repo.compatible_weights(paper_type_id)
        .map_err(ServiceError::from)
}

/// The configured valid chain for a product type; empty lists when the
/// product type has no configuration yet.
pub fn product_specification<R>(
    product_type_id: i32,
    repo: &R,
) -> ServiceResult<ProductSpecification>
where
    R: CatalogReader + ?Sized,
{
    repo.product_specification(product_type_id)
        .map_err(ServiceError::from)
}

/// Creates a custom paper size, reusing an existing one when the dimensions
/// (possibly rotated) already exist.
pub fn create_custom_size<R>(form: &CustomSizeForm, repo: &R) -> ServiceResult<(CustomSizeResponse, bool)>
where
    R: CatalogWriter + ?Sized,
{
    let new_size = form.try_into().map_err(ServiceError::from)?;
    let (size, created) = repo
        .create_custom_paper_size(&new_size, form.weight_id)
        .map_err(|err| match err {
            crate::repository::errors::RepositoryError::NotFound => {
                ServiceError::NotFound("Paper weight")
            }
            other => ServiceError::from(other),
        })?;

    let response = CustomSizeResponse {
        message: (!created)
            .then(|| "A paper size with these dimensions already exists".to_string()),
        size: size.into(),
    };
    Ok((response, created))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::catalog::PaperSeries;
    use crate::repository::mock::MockRepository;

    fn stored_size(id: i32) -> PaperSize {
        let now = chrono::Utc::now().naive_utc();
        PaperSize {
            id,
            name: "Custom Size 1".to_string(),
            series: PaperSeries::Other,
            width_mm: Decimal::from(85),
            height_mm: Decimal::from(55),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn reused_size_carries_a_message() {
        let mut repo = MockRepository::new();
        repo.expect_create_custom_paper_size()
            .returning(|_, _| Ok((stored_size(3), false)));

        let form = CustomSizeForm {
            name: String::new(),
            width_mm: "85".to_string(),
            height_mm: "55".to_string(),
            weight_id: 1,
        };
        let (response, created) = create_custom_size(&form, &repo).expect("size resolves");
        assert!(!created);
        assert!(response.message.is_some());
        assert_eq!(response.size.id, 3);
    }

    #[test]
    fn missing_weight_maps_to_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_create_custom_paper_size()
            .returning(|_, _| Err(crate::repository::errors::RepositoryError::NotFound));

        let form = CustomSizeForm {
            name: String::new(),
            width_mm: "85".to_string(),
            height_mm: "55".to_string(),
            weight_id: 99,
        };
        assert!(matches!(
            create_custom_size(&form, &repo),
            Err(ServiceError::NotFound("Paper weight"))
        ));
    }
}
