//! Address Proximity - address book service with radius queries
//!
//! Stores named addresses and answers "which addresses lie within N km of this
//! point" using great-circle (haversine) distance. The proximity core lives in
//! [`core`] and is pure; [`services`] and [`routes`] wrap it in a store and an
//! HTTP API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, sort_by_distance, ProximityError, ProximityFilter};
pub use models::{Address, GeoPoint, Located, NewAddress, Proximate, ProximityQuery};
pub use services::{AddressStore, MemoryStore, PostgresStore, StoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(10.0, 20.0);
        assert_eq!(haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude), 0.0);
    }
}
