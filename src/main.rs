mod config;
mod db;
mod error;
mod models;
mod repo;
mod routes;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{
    http::{header, StatusCode},
    middleware::{Logger, NormalizePath},
    web, App, HttpResponse, HttpServer,
};
use std::net::SocketAddr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::db::Database;
use crate::error::{codes, AppError, ErrorBody};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting todo backend");

    let config = Config::from_env()?;
    info!("Configuration loaded from environment");

    let db = Database::new(&config.database_url).await?;
    info!("Database connected");

    db.run_migrations().await?;

    let state = web::Data::new(AppState {
        db,
        config: config.clone(),
    });

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    let cors_allow_origin = config.cors_allow_origin.clone();

    info!("Server running at http://{}", addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_allow_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![header::LOCATION])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .route("/health", web::get().to(health_check))
            .configure(routes::create_routes)
            .default_service(web::route().to(unknown_path))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}

/// Malformed request bodies surface with the same error shape as everything
/// else instead of actix's default plain-text 400.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidJson(err.to_string()).into())
}

/// Same treatment for unparseable path segments and query strings.
pub(crate) fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": true }))
}

/// Requests that match no route get a structured 404 with its own code,
/// distinct from a missing resource.
pub(crate) async fn unknown_path() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(StatusCode::NOT_FOUND, codes::NOT_FOUND_PATH))
}
