// Core algorithm exports
pub mod distance;
pub mod filter;
pub mod ordering;

pub use distance::{haversine_distance, ellipsoidal_distance_km, calculate_bounding_box, is_within_bounding_box, EARTH_RADIUS_KM};
pub use filter::{ProximityFilter, ProximityError, DEFAULT_PARALLEL_THRESHOLD};
pub use ordering::sort_by_distance;
