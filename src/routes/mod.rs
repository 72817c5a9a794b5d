// Route exports
pub mod addresses;
pub mod distance;
pub mod errors;
pub mod health;

pub use errors::configure_extractors;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::config::PaginationSettings;
use crate::core::ProximityFilter;
use crate::models::ErrorResponse;
use crate::services::AddressStore;

/// Application state shared across all handlers
pub struct AppState<S> {
    pub store: Arc<S>,
    pub filter: ProximityFilter,
    pub pagination: PaginationSettings,
    pub max_radius_km: Option<f64>,
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>, filter: ProximityFilter, pagination: PaginationSettings) -> Self {
        Self {
            store,
            filter,
            pagination,
            max_radius_km: None,
        }
    }

    pub fn with_max_radius(mut self, max_radius_km: Option<f64>) -> Self {
        self.max_radius_km = max_radius_km;
        self
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            filter: self.filter,
            pagination: self.pagination,
            max_radius_km: self.max_radius_km,
        }
    }
}

pub fn configure_routes<S: AddressStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure::<S>)
            .configure(distance::configure)
            .configure(addresses::configure::<S>),
    );
}

pub(crate) fn bad_request(error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: 400,
    })
}

pub(crate) fn not_found(error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: 404,
    })
}

pub(crate) fn internal_error(error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: 500,
    })
}
