use actix_web::{HttpResponse, get, patch, post, route, web};

use crate::db::DbPool;
use crate::domain::job::UpdateJob;
use crate::dto::jobs::JobResponse;
use crate::forms::jobs::{
    DocketCounterParams, JobListParams, NewJobForm, PaymentUpdateForm, StatusUpdateForm,
    UpdateJobForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::catalog::DieselCatalogRepository;
use crate::repository::job::DieselJobRepository;
use crate::routes::{DEFAULT_ITEMS_PER_PAGE, validate_form};
use crate::services::{self, ServiceError};

#[get("")]
pub async fn list_jobs(
    params: web::Query<JobListParams>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let (total, items) =
        services::jobs::list_jobs(&params, &user, DEFAULT_ITEMS_PER_PAGE, &repo)?;

    let page = params.page.unwrap_or(1);
    let items: Vec<JobResponse> = items.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(Paginated::new(items, page, total, DEFAULT_ITEMS_PER_PAGE)))
}

#[post("")]
pub async fn create_job(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<NewJobForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let jobs = DieselJobRepository::new(&pool);
    let catalog = DieselCatalogRepository::new(&pool);
    let details = services::jobs::create_job(&form, &user, &jobs, &catalog)?;

    Ok(HttpResponse::Created().json(JobResponse::from(details)))
}

#[get("/pending")]
pub async fn pending_jobs(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let jobs = services::jobs::pending_jobs(&repo)?;
    let jobs: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/branches")]
pub async fn job_branches(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let branches = services::jobs::job_branches(&repo)?;
    Ok(HttpResponse::Ok().json(branches))
}

#[get("/docket-counter")]
pub async fn docket_counter(
    params: web::Query<DocketCounterParams>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let counter = services::jobs::docket_counter(&params, &repo)?;
    Ok(HttpResponse::Ok().json(counter))
}

#[get("/analytics")]
pub async fn job_analytics(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let analytics = services::jobs::job_analytics(&user, &repo)?;
    Ok(HttpResponse::Ok().json(analytics))
}

#[get("/designer-stats")]
pub async fn designer_stats(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let stats = services::jobs::designer_stats(&user, &repo)?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/{job_id}")]
pub async fn get_job(
    job_id: web::Path<i32>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let details = services::jobs::get_job(job_id.into_inner(), &repo)?;
    Ok(HttpResponse::Ok().json(JobResponse::from(details)))
}

#[route("/{job_id}", method = "PUT", method = "PATCH")]
pub async fn update_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<UpdateJobForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselJobRepository::new(&pool);
    let updates: UpdateJob = (&form).try_into().map_err(ServiceError::from)?;
    let details = services::jobs::update_job(job_id.into_inner(), &updates, &user, &repo)?;

    Ok(HttpResponse::Ok().json(JobResponse::from(details)))
}

#[patch("/{job_id}/status")]
pub async fn update_job_status(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<StatusUpdateForm>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let details = services::jobs::update_status(job_id.into_inner(), &form, &user, &repo)?;
    Ok(HttpResponse::Ok().json(JobResponse::from(details)))
}

#[patch("/{job_id}/payment")]
pub async fn update_job_payment(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<PaymentUpdateForm>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselJobRepository::new(&pool);
    let details = services::jobs::update_payment(job_id.into_inner(), &form, &user, &repo)?;
    Ok(HttpResponse::Ok().json(JobResponse::from(details)))
}
