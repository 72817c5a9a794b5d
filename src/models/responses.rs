use serde::{Deserialize, Serialize};
use crate::models::domain::{Address, GeoPoint, Proximate};

/// Address returned by the nearby endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyAddress {
    #[serde(flatten)]
    pub address: Address,
    pub distance_km: f64,
}

impl From<Proximate<'_, Address>> for NearbyAddress {
    fn from(hit: Proximate<'_, Address>) -> Self {
        NearbyAddress {
            address: hit.record.clone(),
            distance_km: hit.distance_km,
        }
    }
}

/// Response for the nearby endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub total_candidates: usize,
    pub count: usize,
    pub addresses: Vec<NearbyAddress>,
}

/// Response for the distance endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub haversine_km: f64,
    pub geodesic_km: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
