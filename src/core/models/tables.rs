//! Rows of the information panel: fares, passenger discounts, and time-based pricing

use super::geometry::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the fare table. The first row of a table is its header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRow {
    /// Travel distance tier (e.g., "2 Zones")
    pub tier: String,
    /// Price as displayed (e.g., "$3.75")
    pub price: String,
}

/// A passenger category with its discount badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRow {
    /// Passenger category (e.g., "Senior")
    pub category: String,
    /// Badge text (e.g., "30% OFF")
    pub discount: String,
    /// Badge color
    pub color: Color,
}

/// How a time period changes the base fare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingEffect {
    /// Fare increases during the period
    Surcharge,
    /// Fare decreases during the period
    Discount,
    /// Base fare applies
    Standard,
}

impl fmt::Display for PricingEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surcharge => write!(f, "surcharge"),
            Self::Discount => write!(f, "discount"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

/// A time period with its pricing effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePricingRow {
    /// Period name (e.g., "Peak Hours")
    pub period: String,
    /// Free-text time range (e.g., "Daily: 10 PM - 6 AM")
    pub hours: String,
    /// Effect category
    pub effect: PricingEffect,
    /// Effect label (e.g., "+25% Surcharge")
    pub label: String,
    /// Accent color of the row
    pub color: Color,
}

/// Fixed text of the figure and the information panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelText {
    /// Figure title
    pub title: String,
    /// Second title line
    pub subtitle: String,
    /// Title above the network map
    pub map_title: String,
    /// Fare table heading, including its icon glyph
    pub fare_heading: String,
    /// Discount list heading
    pub discount_heading: String,
    /// Time-pricing list heading
    pub time_heading: String,
    /// Footer lines, top to bottom
    #[serde(default)]
    pub footer: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_effect_parses_lowercase() {
        let row: TimePricingRow = toml::from_str(
            r##"
period = "Off-Peak"
hours = "Daily: 10 PM - 6 AM"
effect = "discount"
label = "10% Discount"
color = "#27ae60"
"##,
        )
        .unwrap();
        assert_eq!(row.effect, PricingEffect::Discount);
        assert_eq!(row.effect.to_string(), "discount");
    }

    #[test]
    fn test_unknown_pricing_effect_is_rejected() {
        let row: Result<TimePricingRow, _> = toml::from_str(
            r##"
period = "Holiday"
hours = "Dec 25"
effect = "free"
label = "Free"
color = "#27ae60"
"##,
        );
        assert!(row.is_err());
    }
}
