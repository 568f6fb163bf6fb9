use crate::{data::geojson::FeatureCollection, prelude::HashMap};

/// Visual state of a boat button. Mirrors trajectory visibility at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Active,
    Inactive,
}

/// One menu button, tagged with the boat it toggles
#[derive(Debug, Clone, PartialEq)]
pub struct BoatButton {
    pub boat: String,
    pub state: ButtonState,
}

/// The per-boat button menu.
///
/// Buttons are held in display order with an explicit boat-to-button index,
/// so state updates never search by attribute and an unknown boat is a silent
/// no-op instead of a failure.
#[derive(Debug, Clone, Default)]
pub struct FleetMenu {
    buttons: Vec<BoatButton>,
    index: HashMap<String, usize>,
}

impl FleetMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the menu from the roster: ascending race rank first, rank-less
    /// (abandoned) boats after, keeping feed order within each class.
    pub fn from_roster(roster: &FeatureCollection) -> Self {
        let mut seen = crate::prelude::HashSet::default();
        let mut entries: Vec<(String, Option<i64>)> = Vec::new();

        for feature in &roster.features {
            if let Some(name) = feature.name() {
                if seen.insert(name.to_string()) {
                    entries.push((name.to_string(), feature.rank()));
                }
            }
        }

        // Stable sort keeps the original relative order of rank-less entries
        entries.sort_by(|a, b| match (a.1, b.1) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let mut menu = Self::new();
        for (boat, _) in entries {
            menu.index.insert(boat.clone(), menu.buttons.len());
            menu.buttons.push(BoatButton {
                boat,
                state: ButtonState::Inactive,
            });
        }
        menu
    }

    /// Updates one button, returning false when the boat has no button
    pub fn set_state(&mut self, boat: &str, state: ButtonState) -> bool {
        match self.index.get(boat) {
            Some(&pos) => {
                self.buttons[pos].state = state;
                true
            }
            None => false,
        }
    }

    pub fn state(&self, boat: &str) -> Option<ButtonState> {
        self.index.get(boat).map(|&pos| self.buttons[pos].state)
    }

    /// Marks every button inactive
    pub fn reset_all(&mut self) {
        for button in &mut self.buttons {
            button.state = ButtonState::Inactive;
        }
    }

    /// Buttons in display order
    pub fn buttons(&self) -> &[BoatButton] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
