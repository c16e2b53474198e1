use config::Config;
use dotenvy::dotenv;

use paragon_jms::models::config::ServerConfig;
use paragon_jms::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config_path = std::env::var("PJMS_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings = Config::builder()
        .set_default("address", "127.0.0.1")
        .and_then(|builder| builder.set_default("port", 8000))
        .and_then(|builder| builder.set_default("database_url", "paragon_jms.db"))
        .map_err(|e| std::io::Error::other(format!("Failed to set config defaults: {e}")))?
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(config::Environment::default())
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    let server_config: ServerConfig = settings
        .try_deserialize()
        .map_err(|e| std::io::Error::other(format!("Invalid configuration: {e}")))?;

    log::info!(
        "Starting server on {}:{}",
        server_config.address,
        server_config.port
    );

    run(server_config).await
}
