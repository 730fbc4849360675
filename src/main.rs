use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing::{error, info};

use jobmatch::config::Settings;
use jobmatch::core::Matcher;
use jobmatch::routes::{self, error as route_error, AdminRegistry, AppState};
use jobmatch::services::{CacheManager, GeocoderClient, Notifier, PostgresClient};

fn startup_error(what: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", what, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", what, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    jobmatch::logging::init(&settings.logging);

    info!("Starting jobmatch service...");

    let cache = CacheManager::from_settings(&settings.cache)
        .await
        .map(Arc::new)
        .map_err(|e| startup_error("Failed to connect to Redis", e))?;

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s)",
        settings.cache.l1_cache_size.unwrap_or(1000),
        settings.cache.ttl_secs.unwrap_or(300)
    );

    let postgres = PostgresClient::from_settings(&settings.database)
        .await
        .map(Arc::new)
        .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?;

    info!(
        "PostgreSQL client initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    let geocoder = GeocoderClient::from_settings(&settings.geocoder)
        .map_err(|e| startup_error("Failed to build geocoder", e))?
        .map(Arc::new);

    match &geocoder {
        Some(_) => info!("Geocoder enabled ({})", settings.geocoder.endpoint),
        None => info!("Geocoder disabled, only explicit coordinates are used"),
    }

    let weights = settings.scoring.weights();
    let matcher = Matcher::new(weights, settings.matching.min_score);

    info!("Matcher initialized with weights: {:?}", weights);

    let admin = Arc::new(AdminRegistry::with_job_moderation());
    let notifier = Notifier::new(postgres.clone(), settings.notifications.cooldown());

    let app_state = AppState {
        postgres,
        cache,
        geocoder,
        notifier,
        admin,
        matcher,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(route_error::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(route_error::handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(route_error::handle_path_error))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
