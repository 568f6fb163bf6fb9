pub mod menu;
pub mod panel;

pub use menu::{BoatButton, ButtonState, FleetMenu};
pub use panel::InfoPanel;
