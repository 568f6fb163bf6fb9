use crate::prelude::HashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Boat name, the key every map artifact for one competitor hangs off
pub const PROP_NAME: &str = "nom";
/// Race rank, nullable; the raw feed marks abandons with a non-numeric value
pub const PROP_RANK: &str = "rang";
/// Heading over the last 30 minutes, degrees
pub const PROP_HEADING: &str = "30m_cap";
/// Speed over the last 30 minutes, knots
pub const PROP_SPEED: &str = "30m_vitesse";
/// Report time of a position fix, ISO-formatted
pub const PROP_TIMESTAMP: &str = "timestamp";

/// Geometry kinds present in the race documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    MultiPoint { coordinates: Vec<[f64; 2]> },
    LineString { coordinates: Vec<[f64; 2]> },
    MultiLineString { coordinates: Vec<Vec<[f64; 2]>> },
}

impl Geometry {
    /// The last coordinate pair of the geometry, in (lng, lat) order
    pub fn last_coordinate(&self) -> Option<[f64; 2]> {
        match self {
            Geometry::Point { coordinates } => Some(*coordinates),
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                coordinates.last().copied()
            }
            Geometry::MultiLineString { coordinates } => {
                coordinates.last().and_then(|line| line.last()).copied()
            }
        }
    }
}

/// A single feature with geometry and a free-form property map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, Value>>,
}

impl Feature {
    /// Creates a feature from a geometry and (key, value) property pairs
    pub fn new<I>(geometry: Geometry, properties: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            geometry: Some(geometry),
            properties: Some(properties.into_iter().collect()),
        }
    }

    fn prop(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(key)
    }

    /// The boat this feature belongs to
    pub fn name(&self) -> Option<&str> {
        self.prop(PROP_NAME)?.as_str()
    }

    /// Race rank. Null, missing or non-numeric ranks (abandons) read as `None`
    pub fn rank(&self) -> Option<i64> {
        self.prop(PROP_RANK)?.as_i64()
    }

    /// Heading over the last 30 minutes, degrees
    pub fn heading(&self) -> Option<f64> {
        self.prop(PROP_HEADING)?.as_f64()
    }

    /// Speed over the last 30 minutes, knots
    pub fn speed(&self) -> Option<f64> {
        self.prop(PROP_SPEED)?.as_f64()
    }

    /// Report time of the fix
    pub fn timestamp(&self) -> Option<&str> {
        self.prop(PROP_TIMESTAMP)?.as_str()
    }
}

/// An immutable-for-the-session set of features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Parses a collection from a raw GeoJSON string. A bare feature becomes
    /// a collection of one.
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        match serde_json::from_str::<GeoJson>(geojson_str)? {
            GeoJson::FeatureCollection(collection) => Ok(collection),
            GeoJson::Feature(feature) => Ok(Self::new(vec![feature])),
        }
    }

    /// Distinct boat names, in first-seen order
    pub fn boats(&self) -> Vec<String> {
        let mut seen = HashSet::default();
        let mut boats = Vec::new();
        for feature in &self.features {
            if let Some(name) = feature.name() {
                if seen.insert(name) {
                    boats.push(name.to_string());
                }
            }
        }
        boats
    }

    /// The subset of features belonging to one boat
    pub fn for_boat(&self, boat: &str) -> FeatureCollection {
        FeatureCollection::new(
            self.features
                .iter()
                .filter(|f| f.name() == Some(boat))
                .cloned()
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fix(boat: &str, lng: f64, lat: f64) -> Feature {
        Feature::new(
            Geometry::Point {
                coordinates: [lng, lat],
            },
            [(PROP_NAME.to_string(), json!(boat))],
        )
    }

    #[test]
    fn test_collection_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"nom": "Maitre CoQ V", "rang": 1, "30m_cap": 210.0, "30m_vitesse": 18.4},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [-1.79, 46.49]
                    }
                }
            ]
        }
        "#;

        let collection = FeatureCollection::from_str(geojson_str).unwrap();
        assert_eq!(collection.len(), 1);

        let feature = &collection.features[0];
        assert_eq!(feature.name(), Some("Maitre CoQ V"));
        assert_eq!(feature.rank(), Some(1));
        assert_eq!(feature.heading(), Some(210.0));
        assert_eq!(feature.speed(), Some(18.4));
    }

    #[test]
    fn test_parse_failure_is_an_error() {
        assert!(FeatureCollection::from_str("{ not geojson").is_err());
        assert!(FeatureCollection::from_str(r#"{"type": "Garbage"}"#).is_err());
    }

    #[test]
    fn test_abandoned_rank_reads_as_none() {
        let feature = Feature::new(
            Geometry::Point {
                coordinates: [0.0, 0.0],
            },
            [
                (PROP_NAME.to_string(), json!("A")),
                (PROP_RANK.to_string(), json!("RET")),
            ],
        );
        assert_eq!(feature.rank(), None);

        let nulled = Feature::new(
            Geometry::Point {
                coordinates: [0.0, 0.0],
            },
            [
                (PROP_NAME.to_string(), json!("B")),
                (PROP_RANK.to_string(), Value::Null),
            ],
        );
        assert_eq!(nulled.rank(), None);
    }

    #[test]
    fn test_boats_distinct_first_seen() {
        let collection = FeatureCollection::new(vec![
            fix("B", 0.0, 0.0),
            fix("A", 1.0, 1.0),
            fix("B", 2.0, 2.0),
        ]);
        assert_eq!(collection.boats(), vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_for_boat_filters_by_name() {
        let collection = FeatureCollection::new(vec![
            fix("A", 0.0, 0.0),
            fix("B", 1.0, 1.0),
            fix("A", 2.0, 2.0),
        ]);

        let subset = collection.for_boat("A");
        assert_eq!(subset.len(), 2);
        assert!(subset.features.iter().all(|f| f.name() == Some("A")));
        assert!(collection.for_boat("C").is_empty());
    }

    #[test]
    fn test_last_coordinate() {
        let line = Geometry::LineString {
            coordinates: vec![[0.0, 0.0], [1.0, 2.0]],
        };
        assert_eq!(line.last_coordinate(), Some([1.0, 2.0]));

        let multi = Geometry::MultiLineString {
            coordinates: vec![vec![[0.0, 0.0]], vec![[3.0, 4.0], [5.0, 6.0]]],
        };
        assert_eq!(multi.last_coordinate(), Some([5.0, 6.0]));
    }
}
