//! Prelude module for common regatta types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use regatta::prelude::*;`

pub use crate::core::{config::ViewerConfig, geo::LatLng, theme::Theme};

pub use crate::data::{
    geojson::{Feature, FeatureCollection, Geometry},
    source::{HttpTrackSource, StaticTrackSource, TrackSource},
    track::{build_tracks, latest_fixes, parse_dms},
};

pub use crate::map::{
    layers::{CirclePaint, LayerSpec, LinePaint, Paint, ZoomInterpolation},
    memory::MemoryMap,
    surface::MapSurface,
    LayerEvent,
};

pub use crate::ui::{
    menu::{BoatButton, ButtonState, FleetMenu},
    panel::InfoPanel,
};

pub use crate::controller::{FleetController, ThemeSnapshot};
pub use crate::viewer::ViewerSession;

pub use crate::{Error as ViewerError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
