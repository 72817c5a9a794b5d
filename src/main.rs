use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use address_proximity::config::{Settings, StorageBackend};
use address_proximity::routes::{self, AppState};
use address_proximity::services::{AddressStore, MemoryStore, PostgresStore};
use std::sync::Arc;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // RUST_LOG takes precedence for per-target filtering
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    init_tracing();

    info!("Starting address proximity service...");

    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    match settings.storage.backend {
        StorageBackend::Postgres => {
            let db = &settings.database;
            let store = PostgresStore::from_settings(
                &db.url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e)
            })?;

            info!(
                "PostgreSQL store initialized (max: {} connections)",
                db.max_connections.unwrap_or(10)
            );

            serve(settings, store).await
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; addresses are lost on restart");
            serve(settings, MemoryStore::new()).await
        }
    }
}

async fn serve<S>(settings: Settings, store: S) -> std::io::Result<()>
where
    S: AddressStore + Send + Sync + 'static,
{
    let filter = settings.proximity.filter();

    info!(
        "Proximity filter: prefilter={}, parallel_threshold={}",
        filter.prefilter_enabled(),
        filter.parallel_threshold()
    );

    let app_state = AppState::new(Arc::new(store), filter, settings.pagination)
        .with_max_radius(settings.proximity.max_radius_km);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_extractors)
            .configure(routes::configure_routes::<S>)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
