//! Station and zone models

use super::geometry::{Color, Point};
use serde::{Deserialize, Serialize};

/// A metro station drawn as a colored marker on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Display name, unique within the network (e.g., "Downtown Central")
    pub name: String,

    /// Fare zone id the station belongs to (e.g., "A")
    pub zone: String,

    /// Position in map units, origin bottom-left
    pub position: Point,

    /// Marker fill color
    pub color: Color,
}

impl Station {
    /// Create a new station
    #[must_use]
    pub fn new(name: &str, zone: &str, position: Point, color: Color) -> Self {
        Self {
            name: name.to_string(),
            zone: zone.to_string(),
            position,
            color,
        }
    }
}

/// A fare zone drawn as a translucent circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier (e.g., "A")
    pub id: String,

    /// Circle center in map units
    pub center: Point,

    /// Circle radius in map units
    pub radius: f64,

    /// Fill, border, and label color
    pub color: Color,

    /// Fill opacity in `0..=1`
    pub alpha: f64,
}

impl Zone {
    /// Label drawn above the circle
    #[must_use]
    pub fn label(&self) -> String {
        format!("ZONE {}", self.id)
    }

    /// Whether `point` falls inside the zone circle
    #[must_use]
    pub fn encloses(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_label_and_enclosure() {
        let zone = Zone {
            id: "B".to_string(),
            center: Point::new(3.8, 3.5),
            radius: 1.8,
            color: Color::rgb(0xf3, 0x9c, 0x12),
            alpha: 0.15,
        };
        assert_eq!(zone.label(), "ZONE B");
        assert!(zone.encloses(Point::new(4.0, 4.0)));
        assert!(!zone.encloses(Point::new(7.0, 3.5)));
    }
}
