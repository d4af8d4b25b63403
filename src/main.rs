use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use matchbook::config::{LogFormat, Settings, CONFIG_PATH_ENV};
use matchbook::routes::{self, people::AppState};
use matchbook::MatchingEngine;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(std::path::PathBuf::from);
    let settings = match Settings::load_with_override(config_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    info!("Starting matchbook...");

    let engine = Arc::new(MatchingEngine::new(settings.matching.quota_policy));

    info!("Matching engine initialized (quota policy: {:?})", settings.matching.quota_policy);

    let app_state = AppState {
        engine,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    let result = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await;

    if let Err(e) = &result {
        error!("HTTP server stopped with error: {}", e);
    } else {
        info!("HTTP server shut down");
    }
    result
}
