use serde::{Deserialize, Serialize};

/// Base map theme. Each theme pairs a base style URL with the colors used
/// for track lines and position fixes drawn on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// URL of the base map style for this theme
    pub fn style_url(&self) -> &'static str {
        match self {
            Theme::Dark => "https://basemaps.cartocdn.com/gl/dark-matter-gl-style/style.json",
            Theme::Light => "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json",
        }
    }

    /// Base color for track lines and fix circles
    pub fn track_color(&self) -> &'static str {
        match self {
            Theme::Dark => "#FF4136",
            Theme::Light => "#007bff",
        }
    }

    /// Color a track line takes while the pointer is over it
    pub fn track_hover_color(&self) -> &'static str {
        "#FF6347"
    }

    /// Color a fix circle takes while the pointer is over it
    pub fn fix_hover_color(&self) -> &'static str {
        "#FFD700"
    }

    /// The other theme
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}
