use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both coordinates are finite numbers (ranges are not checked)
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance to `other` in kilometers
    #[inline]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        crate::core::distance::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

/// Anything that sits at a single point on the globe
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    #[inline]
    fn location(&self) -> GeoPoint {
        *self
    }
}

/// Stored address record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Located for Address {
    #[inline]
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Fields supplied by clients on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAddress {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewAddress {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Center and radius of a proximity query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl ProximityQuery {
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km }
    }
}

/// A record that passed the radius test, with its distance from the center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximate<'a, T> {
    pub record: &'a T,
    pub distance_km: f64,
}

/// Geospatial bounding box
///
/// Longitudes are unwrapped: a box straddling the antimeridian has
/// `min_lon < -180` or `max_lon > 180`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
