use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a LatLng from a GeoJSON coordinate pair (longitude first)
    pub fn from_lng_lat(coord: [f64; 2]) -> Self {
        Self::new(coord[1], coord[0])
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lng_lat_order() {
        let pos = LatLng::from_lng_lat([-30.0, 40.0]);
        assert_eq!(pos.lat, 40.0);
        assert_eq!(pos.lng, -30.0);
    }

    #[test]
    fn test_validity() {
        assert!(LatLng::new(40.0, -30.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -181.0).is_valid());
    }
}
