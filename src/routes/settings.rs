use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::db::DbPool;
use crate::forms::settings::{BranchForm, UpdateSettingsForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::settings::DieselSettingsRepository;
use crate::routes::validate_form;
use crate::services::{self, ServiceError};

#[get("")]
pub async fn get_settings(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselSettingsRepository::new(&pool);
    let settings = services::settings::get_settings(&user, &repo)?;
    Ok(HttpResponse::Ok().json(settings))
}

#[put("")]
pub async fn update_settings(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<UpdateSettingsForm>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselSettingsRepository::new(&pool);
    let settings = services::settings::update_settings(&form, &user, &repo)?;
    Ok(HttpResponse::Ok().json(settings))
}

#[get("/branches")]
pub async fn list_branches(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselSettingsRepository::new(&pool);
    let branches = services::settings::list_branches(&user, &repo)?;
    Ok(HttpResponse::Ok().json(branches))
}

#[post("/branches")]
pub async fn create_branch(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<BranchForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselSettingsRepository::new(&pool);
    let branch = services::settings::create_branch(&form, &user, &repo)?;
    Ok(HttpResponse::Created().json(branch))
}

#[get("/branches/{branch_id}")]
pub async fn get_branch(
    branch_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselSettingsRepository::new(&pool);
    let branch = services::settings::get_branch(branch_id.into_inner(), &user, &repo)?;
    Ok(HttpResponse::Ok().json(branch))
}

#[put("/branches/{branch_id}")]
pub async fn update_branch(
    branch_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<BranchForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselSettingsRepository::new(&pool);
    let branch =
        services::settings::update_branch(branch_id.into_inner(), &form, &user, &repo)?;
    Ok(HttpResponse::Ok().json(branch))
}

#[delete("/branches/{branch_id}")]
pub async fn delete_branch(
    branch_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselSettingsRepository::new(&pool);
    services::settings::delete_branch(branch_id.into_inner(), &user, &repo)?;
    Ok(HttpResponse::NoContent().finish())
}
