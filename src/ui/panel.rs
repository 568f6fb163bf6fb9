/// Side panel showing contextual text while a trajectory is hovered
#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
    content: Option<String>,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats the hover text for a boat: name plus heading and speed when
    /// the trajectory carries them
    pub fn format_hover(boat: &str, heading: Option<f64>, speed: Option<f64>) -> String {
        let mut text = boat.to_string();
        if let Some(heading) = heading {
            text.push_str(&format!(" · cap {heading:.0}°"));
        }
        if let Some(speed) = speed {
            text.push_str(&format!(" · {speed:.1} kn"));
        }
        text
    }

    pub fn show(&mut self, content: String) {
        self.content = Some(content);
    }

    pub fn hide(&mut self) {
        self.content = None;
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_hide() {
        let mut panel = InfoPanel::new();
        assert!(!panel.is_visible());

        panel.show("PRB".to_string());
        assert!(panel.is_visible());
        assert_eq!(panel.content(), Some("PRB"));

        panel.hide();
        assert!(!panel.is_visible());
        assert_eq!(panel.content(), None);
    }

    #[test]
    fn test_format_hover() {
        assert_eq!(
            InfoPanel::format_hover("PRB", Some(210.0), Some(18.42)),
            "PRB · cap 210° · 18.4 kn"
        );
        assert_eq!(InfoPanel::format_hover("PRB", None, None), "PRB");
        assert_eq!(
            InfoPanel::format_hover("PRB", None, Some(9.0)),
            "PRB · 9.0 kn"
        );
    }
}
