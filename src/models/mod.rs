// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Address, NewAddress, GeoPoint, Located, ProximityQuery, Proximate, BoundingBox};
pub use requests::{AddressRequest, ListAddressesQuery, NearbyQuery, DistanceQuery, ResultOrder};
pub use responses::{NearbyAddress, NearbyResponse, DistanceResponse, HealthResponse, ErrorResponse};
