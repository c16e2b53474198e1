#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::auth::{
    admin_stats, all_users, approve_user, login, pending_users, profile, register, token_refresh,
};
#[cfg(feature = "server")]
use crate::routes::catalog::{
    compatible_sizes, compatible_weights, create_custom_size, create_paper_type,
    create_product_type, list_paper_types, list_paper_weights, list_product_types,
    product_specifications,
};
#[cfg(feature = "server")]
use crate::routes::jobs::{
    create_job, designer_stats, docket_counter, get_job, job_analytics, job_branches, list_jobs,
    pending_jobs, update_job, update_job_payment, update_job_status,
};
#[cfg(feature = "server")]
use crate::routes::settings::{
    create_branch, delete_branch, get_branch, get_settings, list_branches, update_branch,
    update_settings,
};

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish the Diesel connection pool for the SQLite database.
    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api/auth")
                    .service(register)
                    .service(login)
                    .service(token_refresh)
                    .service(profile)
                    .service(pending_users)
                    .service(approve_user)
                    .service(all_users)
                    .service(admin_stats),
            )
            .service(
                web::scope("/api/jobs")
                    .service(pending_jobs)
                    .service(job_branches)
                    .service(docket_counter)
                    .service(job_analytics)
                    .service(designer_stats)
                    .service(list_jobs)
                    .service(create_job)
                    .service(get_job)
                    .service(update_job)
                    .service(update_job_status)
                    .service(update_job_payment),
            )
            .service(
                web::scope("/api/products")
                    .service(list_product_types)
                    .service(create_product_type)
                    .service(product_specifications)
                    .service(list_paper_types)
                    .service(create_paper_type)
                    .service(compatible_weights)
                    .service(list_paper_weights)
                    .service(compatible_sizes)
                    .service(create_custom_size),
            )
            .service(
                web::scope("/api/settings")
                    .service(list_branches)
                    .service(create_branch)
                    .service(get_branch)
                    .service(update_branch)
                    .service(delete_branch)
                    .service(get_settings)
                    .service(update_settings),
            )
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
