use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::ellipsoidal_distance_km;
use crate::models::{DistanceQuery, DistanceResponse};
use crate::routes::bad_request;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/distance", web::get().to(distance));
}

/// Distance between two points
///
/// GET /api/v1/distance?from_latitude=..&from_longitude=..&to_latitude=..&to_longitude=..
///
/// Reports the spherical (haversine) distance used by proximity queries and
/// the WGS-84 ellipsoidal distance side by side.
async fn distance(query: web::Query<DistanceQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors);
    }

    let from = query.origin();
    let to = query.destination();

    let haversine_km = from.distance_km(&to);
    let geodesic_km = ellipsoidal_distance_km(from, to);

    tracing::debug!(
        "Distance ({}, {}) -> ({}, {}): {} km spherical, {} km ellipsoidal",
        from.latitude,
        from.longitude,
        to.latitude,
        to.longitude,
        haversine_km,
        geodesic_km
    );

    HttpResponse::Ok().json(DistanceResponse {
        from,
        to,
        haversine_km,
        geodesic_km,
    })
}
