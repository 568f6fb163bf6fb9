pub mod layers;
pub mod memory;
pub mod surface;

pub use layers::{CirclePaint, LayerSpec, LinePaint, Paint, ZoomInterpolation};
pub use memory::MemoryMap;
pub use surface::MapSurface;

/// Pointer events scoped to a named layer, delivered by the host shell
#[derive(Debug, Clone, PartialEq)]
pub enum LayerEvent {
    PointerEnter { layer_id: String },
    PointerLeave { layer_id: String },
}
