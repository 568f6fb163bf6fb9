use crate::{
    core::geo::LatLng,
    data::geojson::FeatureCollection,
    map::layers::{LayerSpec, Paint},
    Result,
};

/// The contract consumed from the external map rendering library.
///
/// Sources and layers are named; a source and the layer drawing from it are
/// created together and destroyed together. Swapping the base style discards
/// every custom source and layer, which is why the controller snapshots and
/// replays visibility around a theme switch.
pub trait MapSurface {
    /// Creates a named vector source from a feature collection
    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<()>;

    /// Destroys a named source
    fn remove_source(&mut self, id: &str) -> Result<()>;

    /// Creates a styled layer drawing from an existing source
    fn add_layer(&mut self, spec: LayerSpec) -> Result<()>;

    /// Destroys a named layer
    fn remove_layer(&mut self, id: &str) -> Result<()>;

    /// Replaces the paint of a named layer
    fn set_paint(&mut self, layer_id: &str, paint: Paint) -> Result<()>;

    /// Swaps the base style, discarding all custom sources and layers
    fn set_style(&mut self, style_url: &str);

    /// Shows a positioned popup, replacing any previous one
    fn show_popup(&mut self, position: LatLng, content: String);

    /// Hides the popup if one is shown
    fn hide_popup(&mut self);

    /// Current zoom level
    fn zoom(&self) -> f64;
}
