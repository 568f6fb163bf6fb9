//! Session wiring: one map surface, one data source, two cached feature
//! collections and the controller that keeps them on screen.

use crate::{
    controller::FleetController,
    core::config::ViewerConfig,
    data::{geojson::FeatureCollection, source::TrackSource},
    map::{surface::MapSurface, LayerEvent},
    Result,
};
use futures::future::try_join;

pub struct ViewerSession<M: MapSurface, S: TrackSource> {
    controller: FleetController<M>,
    source: S,
    tracks: FeatureCollection,
    fixes: FeatureCollection,
}

impl<M: MapSurface, S: TrackSource> ViewerSession<M, S> {
    pub fn new(map: M, source: S, config: &ViewerConfig) -> Self {
        Self {
            controller: FleetController::new(map, config.theme),
            source,
            tracks: FeatureCollection::default(),
            fixes: FeatureCollection::default(),
        }
    }

    /// Fetches both documents and builds the boat menu from the trajectory
    /// roster. A failed fetch is logged and swallowed: no layer is added, no
    /// set is mutated, the menu stays as it was. Returns whether the session
    /// is ready.
    pub async fn start(&mut self) -> bool {
        match try_join(self.source.fetch_tracks(), self.source.fetch_fixes()).await {
            Ok((tracks, fixes)) => {
                log::info!(
                    "race data loaded: {} trajectory features, {} fixes",
                    tracks.len(),
                    fixes.len()
                );
                self.tracks = tracks;
                self.fixes = fixes;
                self.controller.build_menu(&self.tracks);
                true
            }
            Err(err) => {
                log::error!("race data fetch failed: {err}");
                false
            }
        }
    }

    /// A boat button toggles both the trajectory and the fixes
    pub fn toggle_boat(&mut self, boat: &str) -> Result<()> {
        self.controller.toggle_track(boat, &self.tracks)?;
        self.controller.toggle_fixes(boat, &self.fixes)
    }

    pub fn show_all(&mut self) -> Result<()> {
        self.controller.show_all(&self.tracks, &self.fixes)
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.controller.clear_all()
    }

    pub fn handle_event(&mut self, event: &LayerEvent) -> Result<()> {
        self.controller.handle_event(event)
    }

    /// Swaps the theme, re-fetches the data once the new style is in place,
    /// and replays visibility for the boats that were on screen. A failed
    /// re-fetch is logged and swallowed; the swapped style stays, with
    /// nothing drawn on it and every button already reset.
    pub async fn switch_theme(&mut self) -> Result<()> {
        let snapshot = self.controller.begin_theme_switch();

        match try_join(self.source.fetch_tracks(), self.source.fetch_fixes()).await {
            Ok((tracks, fixes)) => {
                self.tracks = tracks;
                self.fixes = fixes;
                self.controller
                    .finish_theme_switch(&snapshot, &self.tracks, &self.fixes)
            }
            Err(err) => {
                log::error!("re-fetch after theme switch failed: {err}");
                Ok(())
            }
        }
    }

    pub fn controller(&self) -> &FleetController<M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FleetController<M> {
        &mut self.controller
    }

    pub fn tracks(&self) -> &FeatureCollection {
        &self.tracks
    }

    pub fn fixes(&self) -> &FeatureCollection {
        &self.fixes
    }
}
