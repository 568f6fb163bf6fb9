//! The layer visibility controller: the single owner of the map handle, the
//! two visible sets, the button menu and the hover panel.
//!
//! Invariant: a named layer/source pair exists on the map iff its boat is a
//! member of the corresponding visible set, and a boat's button is active iff
//! its trajectory is visible.

use crate::{
    core::{geo::LatLng, theme::Theme},
    data::geojson::FeatureCollection,
    map::{
        layers::{CirclePaint, LayerSpec, LinePaint, Paint, ZoomInterpolation},
        surface::MapSurface,
        LayerEvent,
    },
    prelude::{HashMap, HashSet},
    ui::{
        menu::{ButtonState, FleetMenu},
        panel::InfoPanel,
    },
    Result,
};

const TRACK_PREFIX: &str = "track-";
const FIX_PREFIX: &str = "fix-";

const TRACK_WIDTH: f64 = 2.0;
const TRACK_HOVER_WIDTH: f64 = 4.0;
const TRACK_HOVER_BLUR: f64 = 1.0;

/// Fix circles grow from radius 4 at zoom 5 to radius 10 at zoom 10
const FIX_RADIUS_STOPS: [(f64, f64); 2] = [(5.0, 4.0), (10.0, 10.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayerKind {
    Track,
    Fix,
}

fn layer_id(kind: LayerKind, boat: &str) -> String {
    match kind {
        LayerKind::Track => format!("{TRACK_PREFIX}{boat}"),
        LayerKind::Fix => format!("{FIX_PREFIX}{boat}"),
    }
}

fn parse_layer_id(id: &str) -> Option<(LayerKind, &str)> {
    if let Some(boat) = id.strip_prefix(TRACK_PREFIX) {
        Some((LayerKind::Track, boat))
    } else {
        id.strip_prefix(FIX_PREFIX).map(|boat| (LayerKind::Fix, boat))
    }
}

fn fix_radius() -> ZoomInterpolation {
    ZoomInterpolation::new(FIX_RADIUS_STOPS.to_vec())
}

/// Hover context captured when a trajectory layer is created
#[derive(Debug, Clone)]
struct HoverInfo {
    boat: String,
    heading: Option<f64>,
    speed: Option<f64>,
    position: Option<LatLng>,
}

impl HoverInfo {
    fn from_subset(boat: &str, subset: &FeatureCollection) -> Self {
        let last = subset.features.last();
        Self {
            boat: boat.to_string(),
            heading: last.and_then(|f| f.heading()),
            speed: last.and_then(|f| f.speed()),
            position: last
                .and_then(|f| f.geometry.as_ref())
                .and_then(|g| g.last_coordinate())
                .map(LatLng::from_lng_lat),
        }
    }
}

/// Boats visible before a theme switch, replayed once the new style and data
/// have loaded
#[derive(Debug, Clone, Default)]
pub struct ThemeSnapshot {
    pub tracks: Vec<String>,
    pub fixes: Vec<String>,
}

pub struct FleetController<M: MapSurface> {
    map: M,
    theme: Theme,
    shown_tracks: HashSet<String>,
    shown_fixes: HashSet<String>,
    hover: HashMap<String, HoverInfo>,
    menu: FleetMenu,
    panel: InfoPanel,
}

impl<M: MapSurface> FleetController<M> {
    pub fn new(map: M, theme: Theme) -> Self {
        Self {
            map,
            theme,
            shown_tracks: HashSet::default(),
            shown_fixes: HashSet::default(),
            hover: HashMap::default(),
            menu: FleetMenu::new(),
            panel: InfoPanel::new(),
        }
    }

    /// Rebuilds the button menu from the roster
    pub fn build_menu(&mut self, roster: &FeatureCollection) {
        self.menu = FleetMenu::from_roster(roster);
    }

    pub fn menu(&self) -> &FleetMenu {
        &self.menu
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn shown_tracks(&self) -> &HashSet<String> {
        &self.shown_tracks
    }

    pub fn shown_fixes(&self) -> &HashSet<String> {
        &self.shown_fixes
    }

    /// Shows a boat's trajectory line if hidden, hides it if shown, keeping
    /// the button in step
    pub fn toggle_track(&mut self, boat: &str, data: &FeatureCollection) -> Result<()> {
        let id = layer_id(LayerKind::Track, boat);

        if self.shown_tracks.contains(boat) {
            self.map.remove_layer(&id)?;
            self.map.remove_source(&id)?;
            self.shown_tracks.remove(boat);
            self.hover.remove(&id);
            self.menu.set_state(boat, ButtonState::Inactive);
            log::debug!("track hidden: {boat}");
            return Ok(());
        }

        let subset = data.for_boat(boat);
        let info = HoverInfo::from_subset(boat, &subset);
        self.map.add_source(&id, subset)?;
        self.map.add_layer(LayerSpec::line(
            &id,
            &id,
            LinePaint::new(self.theme.track_color()).with_width(TRACK_WIDTH),
        ))?;
        self.shown_tracks.insert(boat.to_string());
        self.hover.insert(id, info);
        self.menu.set_state(boat, ButtonState::Active);
        log::debug!("track shown: {boat}");
        Ok(())
    }

    /// Shows or hides a boat's position-fix circles
    pub fn toggle_fixes(&mut self, boat: &str, data: &FeatureCollection) -> Result<()> {
        let id = layer_id(LayerKind::Fix, boat);

        if self.shown_fixes.contains(boat) {
            self.map.remove_layer(&id)?;
            self.map.remove_source(&id)?;
            self.shown_fixes.remove(boat);
            log::debug!("fixes hidden: {boat}");
            return Ok(());
        }

        self.map.add_source(&id, data.for_boat(boat))?;
        self.map.add_layer(LayerSpec::circle(
            &id,
            &id,
            CirclePaint::new(self.theme.track_color(), fix_radius()),
        ))?;
        self.shown_fixes.insert(boat.to_string());
        log::debug!("fixes shown: {boat}");
        Ok(())
    }

    /// Shows every boat present in the trajectory collection. Idempotent.
    pub fn show_all(
        &mut self,
        tracks: &FeatureCollection,
        fixes: &FeatureCollection,
    ) -> Result<()> {
        for boat in tracks.boats() {
            if !self.shown_tracks.contains(&boat) {
                self.toggle_track(&boat, tracks)?;
            }
            if !self.shown_fixes.contains(&boat) {
                self.toggle_fixes(&boat, fixes)?;
            }
        }
        Ok(())
    }

    /// Removes every visible layer/source pair and resets the menu. Idempotent.
    pub fn clear_all(&mut self) -> Result<()> {
        for boat in std::mem::take(&mut self.shown_tracks) {
            let id = layer_id(LayerKind::Track, &boat);
            self.map.remove_layer(&id)?;
            self.map.remove_source(&id)?;
            self.hover.remove(&id);
        }
        for boat in std::mem::take(&mut self.shown_fixes) {
            let id = layer_id(LayerKind::Fix, &boat);
            self.map.remove_layer(&id)?;
            self.map.remove_source(&id)?;
        }
        self.menu.reset_all();
        self.panel.hide();
        self.map.hide_popup();
        Ok(())
    }

    /// First half of a theme switch: snapshots what is visible, defensively
    /// resets the buttons, and swaps the base style. The style swap discards
    /// every custom layer and source, so both visible sets empty with it.
    pub fn begin_theme_switch(&mut self) -> ThemeSnapshot {
        let snapshot = ThemeSnapshot {
            tracks: self.shown_tracks.iter().cloned().collect(),
            fixes: self.shown_fixes.iter().cloned().collect(),
        };

        self.menu.reset_all();
        self.panel.hide();
        self.theme = self.theme.toggled();
        self.map.set_style(self.theme.style_url());
        self.shown_tracks.clear();
        self.shown_fixes.clear();
        self.hover.clear();

        log::info!("theme switched to {}", self.theme);
        snapshot
    }

    /// Second half of a theme switch, run once the new style and freshly
    /// fetched data are in: replays visibility for every boat in the
    /// snapshot. Boats the user re-toggled during the fetch stay as they are.
    pub fn finish_theme_switch(
        &mut self,
        snapshot: &ThemeSnapshot,
        tracks: &FeatureCollection,
        fixes: &FeatureCollection,
    ) -> Result<()> {
        for boat in &snapshot.tracks {
            if !self.shown_tracks.contains(boat) {
                self.toggle_track(boat, tracks)?;
            }
        }
        for boat in &snapshot.fixes {
            if !self.shown_fixes.contains(boat) {
                self.toggle_fixes(boat, fixes)?;
            }
        }
        Ok(())
    }

    /// Routes a pointer event from the host shell to the hovered layer
    pub fn handle_event(&mut self, event: &LayerEvent) -> Result<()> {
        match event {
            LayerEvent::PointerEnter { layer_id } => self.pointer_entered(layer_id),
            LayerEvent::PointerLeave { layer_id } => self.pointer_left(layer_id),
        }
    }

    fn pointer_entered(&mut self, id: &str) -> Result<()> {
        let Some((kind, boat)) = parse_layer_id(id) else {
            return Ok(());
        };
        match kind {
            LayerKind::Track if self.shown_tracks.contains(boat) => {
                self.map.set_paint(
                    id,
                    Paint::Line(
                        LinePaint::new(self.theme.track_hover_color())
                            .with_width(TRACK_HOVER_WIDTH)
                            .with_blur(TRACK_HOVER_BLUR),
                    ),
                )?;
                if let Some(info) = self.hover.get(id).cloned() {
                    let text = InfoPanel::format_hover(&info.boat, info.heading, info.speed);
                    if let Some(position) = info.position {
                        self.map.show_popup(position, text.clone());
                    }
                    self.panel.show(text);
                }
            }
            LayerKind::Fix if self.shown_fixes.contains(boat) => {
                self.map.set_paint(
                    id,
                    Paint::Circle(CirclePaint::new(self.theme.fix_hover_color(), fix_radius())),
                )?;
            }
            _ => {}
        }
        Ok(())
    }

    fn pointer_left(&mut self, id: &str) -> Result<()> {
        let Some((kind, boat)) = parse_layer_id(id) else {
            return Ok(());
        };
        match kind {
            LayerKind::Track if self.shown_tracks.contains(boat) => {
                self.map.set_paint(
                    id,
                    Paint::Line(
                        LinePaint::new(self.theme.track_color()).with_width(TRACK_WIDTH),
                    ),
                )?;
                self.panel.hide();
                self.map.hide_popup();
            }
            LayerKind::Fix if self.shown_fixes.contains(boat) => {
                self.map.set_paint(
                    id,
                    Paint::Circle(CirclePaint::new(self.theme.track_color(), fix_radius())),
                )?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::geojson::{Feature, Geometry, PROP_HEADING, PROP_NAME, PROP_SPEED},
        map::memory::MemoryMap,
        ui::menu::ButtonState,
    };
    use serde_json::json;

    fn track(boat: &str) -> Feature {
        Feature::new(
            Geometry::LineString {
                coordinates: vec![[-1.79, 46.49], [-2.5, 45.8]],
            },
            [
                (PROP_NAME.to_string(), json!(boat)),
                (PROP_HEADING.to_string(), json!(210.0)),
                (PROP_SPEED.to_string(), json!(18.4)),
            ],
        )
    }

    fn fix(boat: &str) -> Feature {
        Feature::new(
            Geometry::Point {
                coordinates: [-2.5, 45.8],
            },
            [(PROP_NAME.to_string(), json!(boat))],
        )
    }

    fn fleet() -> (FeatureCollection, FeatureCollection) {
        let tracks = FeatureCollection::new(vec![track("A"), track("B")]);
        let fixes = FeatureCollection::new(vec![fix("A"), fix("B")]);
        (tracks, fixes)
    }

    fn controller() -> FleetController<MemoryMap> {
        let mut controller = FleetController::new(MemoryMap::default(), Theme::Dark);
        let (tracks, _) = fleet();
        controller.build_menu(&tracks);
        controller
    }

    /// Layer/source pairs must exist iff the boat is in the matching set
    fn assert_invariant(controller: &FleetController<MemoryMap>, boats: &[&str]) {
        for boat in boats {
            let track_id = layer_id(LayerKind::Track, boat);
            let shown = controller.shown_tracks.contains(*boat);
            assert_eq!(controller.map.has_layer(&track_id), shown);
            assert_eq!(controller.map.has_source(&track_id), shown);

            let fix_id = layer_id(LayerKind::Fix, boat);
            let shown = controller.shown_fixes.contains(*boat);
            assert_eq!(controller.map.has_layer(&fix_id), shown);
            assert_eq!(controller.map.has_source(&fix_id), shown);
        }
    }

    #[test]
    fn test_toggle_track_adds_filtered_pair() {
        let mut controller = controller();
        let (tracks, _) = fleet();

        controller.toggle_track("A", &tracks).unwrap();

        assert!(controller.shown_tracks.contains("A"));
        assert_eq!(controller.menu.state("A"), Some(ButtonState::Active));
        assert_eq!(controller.map.source("track-A").unwrap().len(), 1);
        match &controller.map.layer("track-A").unwrap().paint {
            Paint::Line(paint) => assert_eq!(paint.color, Theme::Dark.track_color()),
            other => panic!("unexpected paint {other:?}"),
        }
        assert_invariant(&controller, &["A", "B"]);
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let mut controller = controller();
        let (tracks, fixes) = fleet();

        controller.toggle_track("A", &tracks).unwrap();
        controller.toggle_track("A", &tracks).unwrap();
        controller.toggle_fixes("A", &fixes).unwrap();
        controller.toggle_fixes("A", &fixes).unwrap();

        assert!(controller.shown_tracks.is_empty());
        assert!(controller.shown_fixes.is_empty());
        assert_eq!(controller.menu.state("A"), Some(ButtonState::Inactive));
        assert_eq!(controller.map.layer_count(), 0);
        assert_invariant(&controller, &["A", "B"]);
    }

    #[test]
    fn test_toggle_unknown_button_is_tolerated() {
        let mut controller = controller();
        let tracks = FeatureCollection::new(vec![track("ghost")]);

        // "ghost" has no button; visibility still works
        controller.toggle_track("ghost", &tracks).unwrap();
        assert!(controller.shown_tracks.contains("ghost"));
        assert_eq!(controller.menu.state("ghost"), None);
    }

    #[test]
    fn test_show_all_is_idempotent() {
        let mut controller = controller();
        let (tracks, fixes) = fleet();

        controller.show_all(&tracks, &fixes).unwrap();
        controller.show_all(&tracks, &fixes).unwrap();

        assert_eq!(controller.shown_tracks.len(), 2);
        assert_eq!(controller.shown_fixes.len(), 2);
        assert_eq!(controller.map.layer_count(), 4);
        assert_invariant(&controller, &["A", "B"]);
    }

    #[test]
    fn test_clear_all_empties_everything() {
        let mut controller = controller();
        let (tracks, fixes) = fleet();

        controller.show_all(&tracks, &fixes).unwrap();
        controller.clear_all().unwrap();

        assert!(controller.shown_tracks.is_empty());
        assert!(controller.shown_fixes.is_empty());
        assert_eq!(controller.map.layer_count(), 0);
        assert!(controller
            .menu
            .buttons()
            .iter()
            .all(|b| b.state == ButtonState::Inactive));

        // Idempotent
        controller.clear_all().unwrap();
        assert_eq!(controller.map.layer_count(), 0);
    }

    #[test]
    fn test_hover_restyles_and_reverts() {
        let mut controller = controller();
        let (tracks, _) = fleet();
        controller.toggle_track("A", &tracks).unwrap();

        controller
            .handle_event(&LayerEvent::PointerEnter {
                layer_id: "track-A".to_string(),
            })
            .unwrap();

        match &controller.map.layer("track-A").unwrap().paint {
            Paint::Line(paint) => {
                assert_eq!(paint.color, Theme::Dark.track_hover_color());
                assert_eq!(paint.width, TRACK_HOVER_WIDTH);
            }
            other => panic!("unexpected paint {other:?}"),
        }
        assert!(controller.panel.is_visible());
        assert_eq!(controller.panel.content(), Some("A · cap 210° · 18.4 kn"));
        let (position, text) = controller.map.popup().unwrap();
        assert_eq!(*position, LatLng::new(45.8, -2.5));
        assert_eq!(text, "A · cap 210° · 18.4 kn");

        controller
            .handle_event(&LayerEvent::PointerLeave {
                layer_id: "track-A".to_string(),
            })
            .unwrap();

        match &controller.map.layer("track-A").unwrap().paint {
            Paint::Line(paint) => assert_eq!(paint.color, Theme::Dark.track_color()),
            other => panic!("unexpected paint {other:?}"),
        }
        assert!(!controller.panel.is_visible());
        assert!(controller.map.popup().is_none());
    }

    #[test]
    fn test_hover_on_hidden_or_foreign_layer_is_ignored() {
        let mut controller = controller();

        controller
            .handle_event(&LayerEvent::PointerEnter {
                layer_id: "track-A".to_string(),
            })
            .unwrap();
        controller
            .handle_event(&LayerEvent::PointerEnter {
                layer_id: "basemap".to_string(),
            })
            .unwrap();

        assert!(!controller.panel.is_visible());
    }

    #[test]
    fn test_fix_hover_restyles_circle() {
        let mut controller = controller();
        let (_, fixes) = fleet();
        controller.toggle_fixes("A", &fixes).unwrap();

        controller
            .handle_event(&LayerEvent::PointerEnter {
                layer_id: "fix-A".to_string(),
            })
            .unwrap();
        match &controller.map.layer("fix-A").unwrap().paint {
            Paint::Circle(paint) => assert_eq!(paint.color, Theme::Dark.fix_hover_color()),
            other => panic!("unexpected paint {other:?}"),
        }

        controller
            .handle_event(&LayerEvent::PointerLeave {
                layer_id: "fix-A".to_string(),
            })
            .unwrap();
        match &controller.map.layer("fix-A").unwrap().paint {
            Paint::Circle(paint) => assert_eq!(paint.color, Theme::Dark.track_color()),
            other => panic!("unexpected paint {other:?}"),
        }
    }

    #[test]
    fn test_theme_switch_snapshot_and_replay() {
        let mut controller = controller();
        let (tracks, fixes) = fleet();
        controller.toggle_track("A", &tracks).unwrap();
        controller.toggle_fixes("A", &fixes).unwrap();

        let snapshot = controller.begin_theme_switch();

        // Transition window: everything reset while the style loads
        assert_eq!(controller.theme(), Theme::Light);
        assert!(controller.shown_tracks.is_empty());
        assert_eq!(controller.map.layer_count(), 0);
        assert_eq!(controller.menu.state("A"), Some(ButtonState::Inactive));
        assert_eq!(controller.map().style_url(), Theme::Light.style_url());

        controller
            .finish_theme_switch(&snapshot, &tracks, &fixes)
            .unwrap();

        assert!(controller.shown_tracks.contains("A"));
        assert!(controller.shown_fixes.contains("A"));
        assert_eq!(controller.menu.state("A"), Some(ButtonState::Active));
        match &controller.map.layer("track-A").unwrap().paint {
            Paint::Line(paint) => assert_eq!(paint.color, Theme::Light.track_color()),
            other => panic!("unexpected paint {other:?}"),
        }
        assert_invariant(&controller, &["A", "B"]);
    }

    #[test]
    fn test_replay_skips_boats_retoggled_during_fetch() {
        let mut controller = controller();
        let (tracks, fixes) = fleet();
        controller.toggle_track("A", &tracks).unwrap();

        let snapshot = controller.begin_theme_switch();

        // User toggles A back on while the fetch is in flight
        controller.toggle_track("A", &tracks).unwrap();
        controller
            .finish_theme_switch(&snapshot, &tracks, &fixes)
            .unwrap();

        // Last write wins: A stays visible exactly once
        assert!(controller.shown_tracks.contains("A"));
        assert_eq!(controller.map.layer_count(), 1);
    }

    #[test]
    fn test_layer_id_round_trip() {
        assert_eq!(
            parse_layer_id(&layer_id(LayerKind::Track, "PRB")),
            Some((LayerKind::Track, "PRB"))
        );
        assert_eq!(
            parse_layer_id(&layer_id(LayerKind::Fix, "PRB")),
            Some((LayerKind::Fix, "PRB"))
        );
        assert_eq!(parse_layer_id("basemap"), None);
    }
}
