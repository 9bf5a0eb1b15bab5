use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use once_cell::sync::Lazy;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use job_board_backend::{
    constants::START_TIME,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

fn init_tracing() {
    let use_json = std::env::var("APP_LOG_JSON")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(env_filter)
            .init();
    }
}

fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();

    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    Lazy::force(&START_TIME);

    let config = AppConfig::new().context("Configuration error")?;
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let app_state = web::Data::new(AppState::new(&config, pool));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting {} v{} on {} with {} workers",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.worker_count
    );

    let cors_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    tokio::select! {
        res = server => res.context("HTTP server failed"),
        _ = shutdown_signal() => Ok(()),
    }
}
