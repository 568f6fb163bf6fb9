use serde::{Deserialize, Serialize};

/// Piecewise-linear interpolation of a value by zoom level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomInterpolation {
    /// (zoom, value) stops in ascending zoom order
    stops: Vec<(f64, f64)>,
}

impl ZoomInterpolation {
    pub fn new(stops: Vec<(f64, f64)>) -> Self {
        debug_assert!(stops.windows(2).all(|w| w[0].0 < w[1].0));
        Self { stops }
    }

    /// Evaluates the interpolation at a zoom level, clamping outside the
    /// stop range
    pub fn eval(&self, zoom: f64) -> f64 {
        let Some(first) = self.stops.first() else {
            return 0.0;
        };
        if zoom <= first.0 {
            return first.1;
        }
        for pair in self.stops.windows(2) {
            let (z0, v0) = pair[0];
            let (z1, v1) = pair[1];
            if zoom <= z1 {
                let t = (zoom - z0) / (z1 - z0);
                return v0 + t * (v1 - v0);
            }
        }
        self.stops.last().map(|s| s.1).unwrap_or(0.0)
    }
}

/// Paint of a line layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePaint {
    pub color: String,
    pub width: f64,
    pub blur: f64,
}

impl LinePaint {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            width: 2.0,
            blur: 0.0,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_blur(mut self, blur: f64) -> Self {
        self.blur = blur;
        self
    }
}

/// Paint of a circle layer, radius interpolated by zoom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePaint {
    pub color: String,
    pub radius: ZoomInterpolation,
}

impl CirclePaint {
    pub fn new(color: impl Into<String>, radius: ZoomInterpolation) -> Self {
        Self {
            color: color.into(),
            radius,
        }
    }
}

/// Paint of a custom layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Line(LinePaint),
    Circle(CirclePaint),
}

/// A named rendering layer drawing from a named source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub paint: Paint,
}

impl LayerSpec {
    pub fn line(id: impl Into<String>, source: impl Into<String>, paint: LinePaint) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            paint: Paint::Line(paint),
        }
    }

    pub fn circle(id: impl Into<String>, source: impl Into<String>, paint: CirclePaint) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            paint: Paint::Circle(paint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_at_stops() {
        let radius = ZoomInterpolation::new(vec![(5.0, 4.0), (10.0, 10.0)]);
        assert_eq!(radius.eval(5.0), 4.0);
        assert_eq!(radius.eval(10.0), 10.0);
    }

    #[test]
    fn test_interpolation_between_stops() {
        let radius = ZoomInterpolation::new(vec![(5.0, 4.0), (10.0, 10.0)]);
        assert!((radius.eval(7.5) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_clamps_outside_range() {
        let radius = ZoomInterpolation::new(vec![(5.0, 4.0), (10.0, 10.0)]);
        assert_eq!(radius.eval(2.0), 4.0);
        assert_eq!(radius.eval(15.0), 10.0);
    }

    #[test]
    fn test_line_paint_builder() {
        let paint = LinePaint::new("#FF4136").with_width(4.0).with_blur(1.0);
        assert_eq!(paint.color, "#FF4136");
        assert_eq!(paint.width, 4.0);
        assert_eq!(paint.blur, 1.0);
    }
}
