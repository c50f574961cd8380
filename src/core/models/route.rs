//! Route model: an ordered chain of stations joined by straight segments

use super::geometry::Color;
use serde::{Deserialize, Serialize};

const fn default_line_width() -> f64 {
    4.0
}

const fn default_line_alpha() -> f64 {
    0.7
}

/// A route drawn as straight segments between consecutive stations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Route name (e.g., "Main Line")
    pub name: String,

    /// Station names in travel order
    pub stations: Vec<String>,

    /// Line color
    #[serde(default = "Route::default_color")]
    pub color: Color,

    /// Stroke width in points
    #[serde(default = "default_line_width")]
    pub width: f64,

    /// Stroke opacity in `0..=1`
    #[serde(default = "default_line_alpha")]
    pub alpha: f64,
}

impl Route {
    const fn default_color() -> Color {
        Color::BLACK
    }

    /// Create a black route with the default stroke
    #[must_use]
    pub fn new(name: &str, stations: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            stations: stations.iter().map(ToString::to_string).collect(),
            color: Self::default_color(),
            width: default_line_width(),
            alpha: default_line_alpha(),
        }
    }

    /// Consecutive station pairs, one per drawn segment
    pub fn segments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stations
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}
