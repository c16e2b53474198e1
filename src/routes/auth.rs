use actix_web::{HttpResponse, get, post, web};
use serde_json::json;

use crate::db::DbPool;
use crate::forms::auth::{ApproveUserForm, LoginForm, RefreshForm, RegisterForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::job::DieselJobRepository;
use crate::repository::user::DieselUserRepository;
use crate::routes::validate_form;
use crate::services::{self, ServiceError};

#[post("/register")]
pub async fn register(
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<RegisterForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselUserRepository::new(&pool);
    services::auth::register(&form, &repo)?;

    Ok(HttpResponse::Created()
        .json(json!({ "message": "User created successfully. Awaiting approval." })))
}

#[post("/login")]
pub async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<LoginForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselUserRepository::new(&pool);
    let response = services::auth::login(&form, &repo, &config.secret)?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/token/refresh")]
pub async fn token_refresh(
    pool: web::Data<DbPool>,
    config: web::Data<ServerConfig>,
    web::Json(form): web::Json<RefreshForm>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselUserRepository::new(&pool);
    let response = services::auth::refresh(&form.refresh, &repo, &config.secret)?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/profile")]
pub async fn profile(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselUserRepository::new(&pool);
    let response = services::auth::profile(user.id, &repo)?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/pending-users")]
pub async fn pending_users(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselUserRepository::new(&pool);
    let response = services::users::pending_users(&user, &repo)?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/approve-user")]
pub async fn approve_user(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Json(form): web::Json<ApproveUserForm>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&form)?;

    let repo = DieselUserRepository::new(&pool);
    let message = services::users::approve_user(&form, &user, &repo)?;
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

#[get("/users")]
pub async fn all_users(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let repo = DieselUserRepository::new(&pool);
    let response = services::users::list_users(&user, &repo)?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/admin/stats")]
pub async fn admin_stats(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ServiceError> {
    let users = DieselUserRepository::new(&pool);
    let jobs = DieselJobRepository::new(&pool);
    let stats = services::users::admin_stats(&user, &users, &jobs)?;
    Ok(HttpResponse::Ok().json(stats))
}
