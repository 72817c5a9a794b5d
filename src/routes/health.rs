use actix_web::{web, HttpResponse, Responder};

use crate::models::HealthResponse;
use crate::routes::AppState;
use crate::services::AddressStore;

pub fn configure<S: AddressStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check::<S>));
}

/// Health check endpoint
async fn health_check<S: AddressStore + 'static>(state: web::Data<AppState<S>>) -> impl Responder {
    let store_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
