//! Plain-text fare guide rendered from `templates/fare_guide.txt`

use super::{route_names, ReportGenerator};
use crate::core::error::MapError;
use crate::core::models::MetroNetwork;
use askama::Template;

/// Stations of one zone as printed in the guide
struct ZoneSection {
    label: String,
    stations: Vec<String>,
}

#[derive(Template)]
#[template(path = "fare_guide.txt")]
struct FareGuideTemplate<'a> {
    title: &'a str,
    subtitle: &'a str,
    rule: String,
    zones: Vec<ZoneSection>,
    routes: Vec<String>,
    fare_heading: &'a str,
    fare_lines: Vec<String>,
    discount_heading: &'a str,
    discount_lines: Vec<String>,
    time_heading: &'a str,
    time_lines: Vec<String>,
    footer: &'a [String],
}

/// Plain-text fare guide generator
#[derive(Debug, Default)]
pub struct FareGuide;

impl FareGuide {
    /// Create a new guide generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn zones(network: &MetroNetwork) -> Vec<ZoneSection> {
        network
            .zones
            .iter()
            .map(|zone| ZoneSection {
                label: zone.label(),
                stations: network
                    .stations_in_zone(&zone.id)
                    .map(|station| {
                        let transfer = if network.routes_through(&station.name).count() > 1 {
                            " [TRANSFER]"
                        } else {
                            ""
                        };
                        format!(
                            "{} ({}){transfer}",
                            station.name,
                            route_names(network, &station.name)
                        )
                    })
                    .collect(),
            })
            .collect()
    }

    /// Two left-aligned columns, the first padded to its widest entry
    fn columns<'r>(rows: impl Iterator<Item = (&'r str, &'r str)> + Clone) -> Vec<String> {
        let width = rows
            .clone()
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or(0);
        rows.map(|(left, right)| format!("{left:<width$}  {right}"))
            .collect()
    }

    fn fare_lines(network: &MetroNetwork) -> Vec<String> {
        let mut lines = Self::columns(
            network
                .fares
                .iter()
                .map(|row| (row.tier.as_str(), row.price.as_str())),
        );
        if let Some(header) = lines.first() {
            let underline = "-".repeat(header.chars().count());
            lines.insert(1, underline);
        }
        lines
    }
}

impl ReportGenerator for FareGuide {
    fn render(&self, network: &MetroNetwork) -> Result<String, MapError> {
        let panel = &network.panel;
        let template = FareGuideTemplate {
            title: &panel.title,
            subtitle: &panel.subtitle,
            rule: "=".repeat(panel.title.chars().count().max(panel.subtitle.chars().count())),
            zones: Self::zones(network),
            routes: network
                .routes
                .iter()
                .map(|route| format!("{}: {}", route.name, route.stations.join(" → ")))
                .collect(),
            fare_heading: &panel.fare_heading,
            fare_lines: Self::fare_lines(network),
            discount_heading: &panel.discount_heading,
            discount_lines: Self::columns(
                network
                    .discounts
                    .iter()
                    .map(|row| (row.category.as_str(), row.discount.as_str())),
            ),
            time_heading: &panel.time_heading,
            time_lines: network
                .time_pricing
                .iter()
                .map(|row| format!("{} ({}): {}", row.period, row.hours, row.label))
                .collect(),
            footer: &panel.footer,
        };
        template.render().map_err(|e| MapError::Export {
            format: "text".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide() -> String {
        FareGuide::new()
            .render(&MetroNetwork::builtin().unwrap())
            .unwrap()
    }

    #[test]
    fn test_guide_lists_stations_by_zone() {
        let text = guide();
        let zone_a = text.find("ZONE A").unwrap();
        let zone_b = text.find("ZONE B").unwrap();
        let harbor = text.find("Harbor View (Harbor Line)").unwrap();
        assert!(zone_a < harbor && harbor < zone_b);
        assert!(text.contains("Downtown Central (Main Line, Central Connector) [TRANSFER]"));
        assert!(!text.contains("Uptown North (Main Line) [TRANSFER]"));
    }

    #[test]
    fn test_guide_lists_routes_and_tables() {
        let text = guide();
        assert!(text.contains(
            "Main Line: Uptown North → Downtown Central → Eastside Plaza → University Campus"
        ));
        assert!(text.contains("2 Zones             $3.75"));
        assert!(text.contains("Senior    30% OFF"));
        assert!(text.contains("Peak Hours (Mon-Fri: 7-9 AM & 5-7 PM): +25% Surcharge"));
        assert!(text.contains("For assistance call: 1-800-METRO-GO"));
    }

    #[test]
    fn test_ampersand_is_not_escaped() {
        let text = guide();
        assert!(text.contains("Zones, Fares & Discounts"));
        assert!(!text.contains("&amp;"));
    }

    #[test]
    fn test_columns_pad_to_widest() {
        let lines = FareGuide::columns([("a", "1"), ("abc", "2")].into_iter());
        assert_eq!(lines, vec!["a    1", "abc  2"]);
    }
}
