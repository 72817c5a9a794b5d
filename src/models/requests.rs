use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{GeoPoint, NewAddress};

/// Body of create and update requests
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<AddressRequest> for NewAddress {
    fn from(req: AddressRequest) -> Self {
        NewAddress {
            name: req.name,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}

/// Pagination parameters for the address listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAddressesQuery {
    #[serde(default)]
    pub skip: u32,
    pub limit: Option<u32>,
}

/// Requested ordering of proximity results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrder {
    /// Store order (ascending id)
    #[default]
    Input,
    /// Ascending distance from the center
    Distance,
}

/// Query string of the nearby endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "radius")]
    pub radius_km: f64,
    #[serde(default)]
    pub order: ResultOrder,
}

impl NearbyQuery {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Query string of the point-to-point distance endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DistanceQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub from_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub from_longitude: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub to_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub to_longitude: f64,
}

impl DistanceQuery {
    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.from_latitude, self.from_longitude)
    }

    pub fn destination(&self) -> GeoPoint {
        GeoPoint::new(self.to_latitude, self.to_longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_request_validation() {
        let ok = AddressRequest {
            name: "Depot".to_string(),
            latitude: 10.0,
            longitude: 20.0,
        };
        assert!(ok.validate().is_ok());

        let empty_name = AddressRequest { name: String::new(), ..ok.clone() };
        assert!(empty_name.validate().is_err());

        let bad_lat = AddressRequest { latitude: 91.0, ..ok.clone() };
        assert!(bad_lat.validate().is_err());

        let bad_lon = AddressRequest { longitude: -180.5, ..ok };
        assert!(bad_lon.validate().is_err());
    }

    #[test]
    fn test_nearby_query_defaults_to_input_order() {
        let query: NearbyQuery =
            serde_json::from_str(r#"{"latitude": 1.0, "longitude": 2.0, "radius_km": 3.0}"#)
                .unwrap();
        assert_eq!(query.order, ResultOrder::Input);
        assert_eq!(query.center(), GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn test_nearby_query_rejects_negative_radius() {
        let query = NearbyQuery {
            latitude: 0.0,
            longitude: 0.0,
            radius_km: -1.0,
            order: ResultOrder::Input,
        };
        assert!(query.validate().is_err());
    }
}
