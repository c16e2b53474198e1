use actix_web::{HttpResponse, get, post, web};

use crate::db::DbPool;
use crate::dto::catalog::PaperSizeResponse;
use crate::forms::catalog::{CompatibleWeightsParams, CustomSizeForm, NewPaperTypeForm, NewProductTypeForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::catalog::DieselCatalogRepository;
use crate::routes::validate_form;
use crate::services::{self, ServiceError};

#[get("/product-types")]
pub async fn list_product_types(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselCatalogRepository::new(&pool);
    let types = services::catalog::list_product_types(&repo)?;
    Ok(HttpResponse::Ok().json(types))
}

#[post("/product-types")]
pub async fn create_product_type(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<NewProductTypeForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselCatalogRepository::new(&pool);
    let created = services::catalog::create_product_type(&form, &repo)?;
    Ok(HttpResponse::Created().json(created))
}

#[get("/paper-types")]
pub async fn list_paper_types(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselCatalogRepository::new(&pool);
    let types = services::catalog::list_paper_types(&repo)?;
    Ok(HttpResponse::Ok().json(types))
}

#[post("/paper-types")]
pub async fn create_paper_type(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<NewPaperTypeForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselCatalogRepository::new(&pool);
    let created = services::catalog::create_paper_type(&form, &repo)?;
    Ok(HttpResponse::Created().json(created))
}

#[get("/paper-weights")]
pub async fn list_paper_weights(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselCatalogRepository::new(&pool);
    let weights = services::catalog::list_paper_weights(&repo)?;
    Ok(HttpResponse::Ok().json(weights))
}

/// Compatible weights for a paper type, the second step of the cascading
/// product type -> paper type -> weight -> size selection.
#[get("/paper-types/weights")]
pub async fn compatible_weights(
    params: web::Query<CompatibleWeightsParams>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselCatalogRepository::new(&pool);
    let weights = services::catalog::compatible_weights(params.paper_type_id, &repo)?;
    Ok(HttpResponse::Ok().json(weights))
}

/// All sizes, the final step of the cascade (sizes are not filtered by
/// weight).
#[get("/paper-weights/sizes")]
pub async fn compatible_sizes(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselCatalogRepository::new(&pool);
    let sizes = services::catalog::list_paper_sizes(&repo)?;
    let sizes: Vec<PaperSizeResponse> = sizes.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(sizes))
}

#[get("/product-types/{product_type_id}/specifications")]
pub async fn product_specifications(
    product_type_id: web::Path<i32>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselCatalogRepository::new(&pool);
    let spec = services::catalog::product_specification(product_type_id.into_inner(), &repo)?;
    Ok(HttpResponse::Ok().json(spec))
}

#[post("/paper-sizes/custom")]
pub async fn create_custom_size(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<CustomSizeForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselCatalogRepository::new(&pool);
    let (response, created) = services::catalog::create_custom_size(&form, &repo)?;

    // A brand-new size is returned bare; a reused one is wrapped with the
    // explanation message.
    if created {
        Ok(HttpResponse::Created().json(response.size))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}
