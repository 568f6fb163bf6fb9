use crate::core::{geo::LatLng, theme::Theme};
use serde::{Deserialize, Serialize};

const DEFAULT_TRACKS_URL: &str =
    "https://raw.githubusercontent.com/florentfgrs/Vendee-Globe-2024/refs/heads/main/data/trajectoire.geojson";
const DEFAULT_FIXES_URL: &str =
    "https://raw.githubusercontent.com/florentfgrs/Vendee-Globe-2024/refs/heads/main/data/pointages.geojson";

/// Configuration for a viewer session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// URL of the trajectory feature collection
    pub tracks_url: String,
    /// URL of the position-fix feature collection
    pub fixes_url: String,
    /// Initial map center
    pub center: LatLng,
    /// Initial zoom level
    pub zoom: f64,
    /// Theme the session starts with
    pub theme: Theme,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tracks_url: DEFAULT_TRACKS_URL.to_string(),
            fixes_url: DEFAULT_FIXES_URL.to_string(),
            center: LatLng::new(40.0, -30.0),
            zoom: 3.0,
            theme: Theme::Dark,
        }
    }
}

impl ViewerConfig {
    /// Parses a configuration from a JSON document
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.zoom, 3.0);
        assert_eq!(config.center, LatLng::new(40.0, -30.0));
        assert!(config.tracks_url.ends_with("trajectoire.geojson"));
        assert!(config.fixes_url.ends_with("pointages.geojson"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "tracks_url": "http://localhost/t.geojson",
            "fixes_url": "http://localhost/p.geojson",
            "center": { "lat": 46.5, "lng": -1.8 },
            "zoom": 5.0,
            "theme": "light"
        }"#;

        let config = ViewerConfig::from_json(json).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.center.lat, 46.5);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ViewerConfig::from_json("not json").is_err());
    }
}
