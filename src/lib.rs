//! # Regatta
//!
//! Session logic for an offshore sailboat race tracking viewer.
//!
//! The crate fetches two GeoJSON documents (trajectories and position fixes),
//! partitions their features by boat, and keeps per-boat map layers and a
//! button menu in sync. All rendering, projection and tiling is delegated to
//! an external map surface consumed through the [`map::MapSurface`] trait.

pub mod controller;
pub mod core;
pub mod data;
pub mod map;
pub mod prelude;
pub mod ui;
pub mod viewer;

// Re-export public API
pub use crate::core::{config::ViewerConfig, geo::LatLng, theme::Theme};

pub use crate::data::{
    geojson::{Feature, FeatureCollection, Geometry},
    source::{HttpTrackSource, StaticTrackSource, TrackSource},
};

pub use crate::controller::{FleetController, ThemeSnapshot};

pub use crate::map::{memory::MemoryMap, surface::MapSurface, LayerEvent};

pub use crate::viewer::ViewerSession;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = ViewerError;
