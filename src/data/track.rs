//! Assembly of derived products from raw position fixes: per-boat trajectory
//! lines, the latest fix per boat, and coordinate parsing for the upstream
//! degrees-minutes-seconds notation.

use crate::{
    data::geojson::{Feature, FeatureCollection, Geometry, PROP_HEADING, PROP_NAME, PROP_RANK, PROP_SPEED},
    prelude::HashMap,
};
use geo_types::{Coord, LineString};
use serde_json::Value;

/// Builds one trajectory feature per boat from its position fixes.
///
/// Fixes are grouped by boat in first-seen order and sorted by report time
/// within each group. A track that crosses the antimeridian is split there,
/// yielding a MultiLineString instead of one line that wraps around the map.
pub fn build_tracks(fixes: &FeatureCollection) -> FeatureCollection {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Feature>> = HashMap::default();

    for feature in &fixes.features {
        let Some(name) = feature.name() else { continue };
        if !matches!(feature.geometry, Some(Geometry::Point { .. })) {
            continue;
        }
        groups
            .entry(name)
            .or_insert_with(|| {
                order.push(name);
                Vec::new()
            })
            .push(feature);
    }

    let mut tracks = Vec::with_capacity(order.len());
    for name in order {
        let mut group = groups.remove(name).unwrap_or_default();
        group.sort_by(|a, b| a.timestamp().cmp(&b.timestamp()));

        let points: Vec<Coord> = group
            .iter()
            .filter_map(|f| match f.geometry {
                Some(Geometry::Point { coordinates }) => Some(Coord {
                    x: coordinates[0],
                    y: coordinates[1],
                }),
                _ => None,
            })
            .collect();
        if points.is_empty() {
            continue;
        }

        let mut properties = vec![(PROP_NAME.to_string(), Value::from(name))];
        if let Some(last) = group.last() {
            for key in [PROP_RANK, PROP_HEADING, PROP_SPEED] {
                if let Some(value) = last.properties.as_ref().and_then(|p| p.get(key)) {
                    properties.push((key.to_string(), value.clone()));
                }
            }
        }

        tracks.push(Feature::new(assemble_geometry(points), properties));
    }

    FeatureCollection::new(tracks)
}

/// Splits a point sequence at antimeridian jumps and emits the matching
/// line geometry
fn assemble_geometry(points: Vec<Coord>) -> Geometry {
    let mut segments: Vec<LineString> = Vec::new();
    let mut current: Vec<Coord> = vec![points[0]];

    for pair in points.windows(2) {
        if (pair[0].x - pair[1].x).abs() > 180.0 {
            segments.push(LineString::new(std::mem::take(&mut current)));
            current.push(pair[1]);
        } else {
            current.push(pair[1]);
        }
    }
    if !current.is_empty() {
        segments.push(LineString::new(current));
    }

    let to_coords = |line: &LineString| -> Vec<[f64; 2]> {
        line.coords().map(|c| [c.x, c.y]).collect()
    };

    if segments.len() > 1 {
        Geometry::MultiLineString {
            coordinates: segments.iter().map(to_coords).collect(),
        }
    } else {
        Geometry::LineString {
            coordinates: to_coords(&segments[0]),
        }
    }
}

/// The newest fix per boat, in first-seen boat order. Later features win
/// timestamp ties.
pub fn latest_fixes(fixes: &FeatureCollection) -> FeatureCollection {
    let mut order: Vec<&str> = Vec::new();
    let mut newest: HashMap<&str, &Feature> = HashMap::default();

    for feature in &fixes.features {
        let Some(name) = feature.name() else { continue };
        let is_newer = match newest.get(name) {
            Some(current) => feature.timestamp() >= current.timestamp(),
            None => {
                order.push(name);
                true
            }
        };
        if is_newer {
            newest.insert(name, feature);
        }
    }

    FeatureCollection::new(
        order
            .into_iter()
            .filter_map(|name| newest.get(name).map(|f| (*f).clone()))
            .collect(),
    )
}

/// Parses an upstream coordinate in `DD°MM.SS'D` notation to decimal degrees.
///
/// The minutes and seconds sit on either side of the dot, and the trailing
/// direction letter makes south and west negative.
pub fn parse_dms(coord: &str) -> Option<f64> {
    let coord = coord.trim();
    let direction = coord.chars().last()?;
    let body: String = coord[..coord.len() - direction.len_utf8()]
        .chars()
        .filter(|c| *c != '\'' && *c != '"')
        .collect();

    let (degrees, rest) = body.split_once('°')?;
    let (minutes, seconds) = rest.split_once('.')?;

    let degrees: f64 = degrees.trim().parse().ok()?;
    let minutes: f64 = minutes.trim().parse().ok()?;
    let seconds: f64 = seconds.trim().parse().ok()?;

    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    match direction {
        'N' | 'E' => Some(decimal),
        'S' | 'W' => Some(-decimal),
        _ => None,
    }
}
