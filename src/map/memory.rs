use crate::{
    core::geo::LatLng,
    data::geojson::FeatureCollection,
    map::{
        layers::{LayerSpec, Paint},
        surface::MapSurface,
    },
    prelude::HashMap,
    Error, Result,
};

/// In-memory map surface.
///
/// Tracks named sources and layers the way the real library does, including
/// the style-swap behavior that discards them. Backs the headless demo and
/// every controller test.
pub struct MemoryMap {
    sources: HashMap<String, FeatureCollection>,
    layers: HashMap<String, LayerSpec>,
    /// Layer ids in insertion order
    order: Vec<String>,
    style_url: String,
    zoom: f64,
    popup: Option<(LatLng, String)>,
}

impl MemoryMap {
    pub fn new(style_url: impl Into<String>, zoom: f64) -> Self {
        Self {
            sources: HashMap::default(),
            layers: HashMap::default(),
            order: Vec::new(),
            style_url: style_url.into(),
            zoom,
            popup: None,
        }
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.get(id)
    }

    pub fn source(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id)
    }

    pub fn has_layer(&self, id: &str) -> bool {
        self.layers.contains_key(id)
    }

    pub fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer ids in insertion order
    pub fn layer_ids(&self) -> &[String] {
        &self.order
    }

    pub fn style_url(&self) -> &str {
        &self.style_url
    }

    pub fn popup(&self) -> Option<&(LatLng, String)> {
        self.popup.as_ref()
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self::new(crate::Theme::Dark.style_url(), 3.0)
    }
}

impl MapSurface for MemoryMap {
    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<()> {
        if self.sources.contains_key(id) {
            return Err(Error::Layer(format!("source already exists: {id}")));
        }
        self.sources.insert(id.to_string(), data);
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> Result<()> {
        self.sources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::Layer(format!("no such source: {id}")))
    }

    fn add_layer(&mut self, spec: LayerSpec) -> Result<()> {
        if self.layers.contains_key(&spec.id) {
            return Err(Error::Layer(format!("layer already exists: {}", spec.id)));
        }
        if !self.sources.contains_key(&spec.source) {
            return Err(Error::Layer(format!(
                "layer {} references missing source {}",
                spec.id, spec.source
            )));
        }
        self.order.push(spec.id.clone());
        self.layers.insert(spec.id.clone(), spec);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<()> {
        self.order.retain(|layer_id| layer_id != id);
        self.layers
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::Layer(format!("no such layer: {id}")))
    }

    fn set_paint(&mut self, layer_id: &str, paint: Paint) -> Result<()> {
        let layer = self
            .layers
            .get_mut(layer_id)
            .ok_or_else(|| Error::Layer(format!("no such layer: {layer_id}")))?;
        layer.paint = paint;
        Ok(())
    }

    fn set_style(&mut self, style_url: &str) {
        // A style swap invalidates everything drawn on top of the base map
        self.sources.clear();
        self.layers.clear();
        self.order.clear();
        self.popup = None;
        self.style_url = style_url.to_string();
    }

    fn show_popup(&mut self, position: LatLng, content: String) {
        self.popup = Some((position, content));
    }

    fn hide_popup(&mut self) {
        self.popup = None;
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}
