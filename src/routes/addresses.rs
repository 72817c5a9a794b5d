use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::sort_by_distance;
use crate::models::{
    AddressRequest, ListAddressesQuery, NearbyAddress, NearbyQuery, NearbyResponse, NewAddress,
    ProximityQuery, ResultOrder,
};
use crate::routes::{bad_request, internal_error, not_found, AppState};
use crate::services::AddressStore;

/// Configure all address routes
pub fn configure<S: AddressStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/addresses", web::post().to(create_address::<S>))
        .route("/addresses", web::get().to(list_addresses::<S>))
        // Must be registered before `/addresses/{id}`
        .route("/addresses/nearby", web::get().to(nearby_addresses::<S>))
        .route("/addresses/{id}", web::get().to(read_address::<S>))
        .route("/addresses/{id}", web::put().to(update_address::<S>))
        .route("/addresses/{id}", web::delete().to(delete_address::<S>));
}

/// Create address endpoint
///
/// POST /api/v1/addresses
///
/// Request body:
/// ```json
/// { "name": "string", "latitude": 10.0, "longitude": 20.0 }
/// ```
async fn create_address<S: AddressStore + 'static>(
    state: web::Data<AppState<S>>,
    req: web::Json<AddressRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_address: {:?}", errors);
        return bad_request("Validation failed", errors);
    }

    let new_address = NewAddress::from(req.into_inner());

    match state.store.create(&new_address).await {
        Ok(address) => {
            tracing::info!("Created address {} ({})", address.id, address.name);
            HttpResponse::Ok().json(address)
        }
        Err(e) => {
            tracing::error!("Failed to create address: {}", e);
            internal_error("Failed to create address", e)
        }
    }
}

/// Read address endpoint
///
/// GET /api/v1/addresses/{id}
async fn read_address<S: AddressStore + 'static>(
    state: web::Data<AppState<S>>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.get(id).await {
        Ok(Some(address)) => HttpResponse::Ok().json(address),
        Ok(None) => not_found("Address not found", format!("No address with id {}", id)),
        Err(e) => {
            tracing::error!("Failed to fetch address {}: {}", id, e);
            internal_error("Failed to fetch address", e)
        }
    }
}

/// List addresses endpoint
///
/// GET /api/v1/addresses?skip=0&limit=10
async fn list_addresses<S: AddressStore + 'static>(
    state: web::Data<AppState<S>>,
    query: web::Query<ListAddressesQuery>,
) -> impl Responder {
    let limit = state.pagination.effective_limit(query.limit);

    match state.store.list(query.skip, limit).await {
        Ok(addresses) => HttpResponse::Ok().json(addresses),
        Err(e) => {
            tracing::error!("Failed to list addresses: {}", e);
            internal_error("Failed to list addresses", e)
        }
    }
}

/// Update address endpoint
///
/// PUT /api/v1/addresses/{id}
async fn update_address<S: AddressStore + 'static>(
    state: web::Data<AppState<S>>,
    path: web::Path<i64>,
    req: web::Json<AddressRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors);
    }

    let id = path.into_inner();
    let new_address = NewAddress::from(req.into_inner());

    match state.store.update(id, &new_address).await {
        Ok(Some(address)) => {
            tracing::info!("Updated address {}", id);
            HttpResponse::Ok().json(address)
        }
        Ok(None) => not_found("Address not found", format!("No address with id {}", id)),
        Err(e) => {
            tracing::error!("Failed to update address {}: {}", id, e);
            internal_error("Failed to update address", e)
        }
    }
}

/// Delete address endpoint
///
/// DELETE /api/v1/addresses/{id}
///
/// Responds with the deleted record.
async fn delete_address<S: AddressStore + 'static>(
    state: web::Data<AppState<S>>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete(id).await {
        Ok(Some(address)) => {
            tracing::info!("Deleted address {}", id);
            HttpResponse::Ok().json(address)
        }
        Ok(None) => not_found("Address not found", format!("No address with id {}", id)),
        Err(e) => {
            tracing::error!("Failed to delete address {}: {}", id, e);
            internal_error("Failed to delete address", e)
        }
    }
}

/// Proximity query endpoint
///
/// GET /api/v1/addresses/nearby?latitude=10.0&longitude=20.0&radius_km=15&order=distance
///
/// Returns every stored address within `radius_km` of the center. Results
/// come back in store order unless `order=distance` is given.
async fn nearby_addresses<S: AddressStore + 'static>(
    state: web::Data<AppState<S>>,
    query: web::Query<NearbyQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for nearby query: {:?}", errors);
        return bad_request("Validation failed", errors);
    }

    if let Some(max_radius_km) = state.max_radius_km {
        if query.radius_km > max_radius_km {
            return bad_request(
                "Radius too large",
                format!("radius_km must not exceed {} km", max_radius_km),
            );
        }
    }

    let candidates = match state.store.all().await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to load candidate addresses: {}", e);
            return internal_error("Failed to load addresses", e);
        }
    };

    let proximity = ProximityQuery::new(query.center(), query.radius_km);

    let mut hits = match state.filter.find(&proximity, &candidates) {
        Ok(hits) => hits,
        Err(e) => return bad_request("Invalid proximity query", e),
    };

    if query.order == ResultOrder::Distance {
        sort_by_distance(&mut hits);
    }

    let addresses: Vec<NearbyAddress> = hits.into_iter().map(NearbyAddress::from).collect();

    tracing::info!(
        "Nearby query ({}, {}) r={} km: {} of {} addresses",
        proximity.center.latitude,
        proximity.center.longitude,
        proximity.radius_km,
        addresses.len(),
        candidates.len()
    );

    HttpResponse::Ok().json(NearbyResponse {
        center: proximity.center,
        radius_km: proximity.radius_km,
        total_candidates: candidates.len(),
        count: addresses.len(),
        addresses,
    })
}
