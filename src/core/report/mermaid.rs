//! Mermaid diagram generator for the metro network
//!
//! Generates a Markdown page whose flowchart renders on GitHub, GitLab, and
//! other Markdown viewers: one subgraph per zone, one node per station, and
//! one thick labelled edge per route segment.

use super::{route_names, ReportGenerator};
use crate::core::error::MapError;
use crate::core::models::{Color, MetroNetwork};
use std::fmt::Write;

/// Embedded Markdown page template
const NETWORK_TEMPLATE: &str = include_str!("templates/network.md");

/// Generator for the Markdown network page
#[derive(Debug, Default)]
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Create a new generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generate the fenced Mermaid flowchart of the network
    #[must_use]
    pub fn generate_network(network: &MetroNetwork) -> String {
        let mut output = String::from("```mermaid\nflowchart LR\n");

        for zone in &network.zones {
            let zone_id = Self::zone_id(&zone.id);
            let _ = writeln!(output, "    subgraph {zone_id}[\"{}\"]", zone.label());
            for station in network.stations_in_zone(&zone.id) {
                let node = Self::sanitize_id(&station.name);
                let label = station.name.replace(' ', "<br/>");
                let _ = writeln!(output, "        {node}((\"{label}\"))");
            }
            output.push_str("    end\n");
        }
        output.push('\n');

        // Edge order defines linkStyle indices
        let mut link_styles = String::new();
        for (index, (route, from, to)) in network
            .routes
            .iter()
            .flat_map(|route| route.segments().map(move |(a, b)| (route, a, b)))
            .enumerate()
        {
            let _ = writeln!(
                output,
                "    {} ==>|{}| {}",
                Self::sanitize_id(from),
                route.name,
                Self::sanitize_id(to)
            );
            let _ = writeln!(
                link_styles,
                "    linkStyle {index} stroke:{},stroke-width:{}px",
                route.color, route.width
            );
        }
        output.push('\n');
        output.push_str(&link_styles);

        for zone in &network.zones {
            let _ = writeln!(
                output,
                "    style {} fill:{},stroke:{},stroke-width:3px",
                Self::zone_id(&zone.id),
                Self::tint(zone.color, zone.alpha),
                zone.color
            );
        }
        for station in &network.stations {
            let _ = writeln!(
                output,
                "    style {} fill:{},stroke:{},stroke-width:3px,color:{}",
                Self::sanitize_id(&station.name),
                station.color,
                Color::WHITE,
                Color::WHITE
            );
        }

        output.push_str("```\n");
        output
    }

    /// Zone table rows: zone label and its stations
    fn zone_rows(network: &MetroNetwork) -> String {
        let mut rows = String::new();
        for zone in &network.zones {
            let stations: Vec<&str> = network
                .stations_in_zone(&zone.id)
                .map(|s| s.name.as_str())
                .collect();
            let _ = writeln!(rows, "| {} | {} |", zone.label(), stations.join(", "));
        }
        rows
    }

    /// Route list: one bullet per route with its stops in order
    fn route_list(network: &MetroNetwork) -> String {
        let mut list = String::new();
        for route in &network.routes {
            let _ = writeln!(list, "- **{}**: {}", route.name, route.stations.join(" → "));
        }
        list
    }

    /// Stations served by more than one route
    fn transfer_list(network: &MetroNetwork) -> String {
        let mut list = String::new();
        for station in &network.stations {
            if network.routes_through(&station.name).count() > 1 {
                let _ = writeln!(
                    list,
                    "- {} ({})",
                    station.name,
                    route_names(network, &station.name)
                );
            }
        }
        if list.is_empty() {
            list.push_str("- None\n");
        }
        list
    }

    /// Mix `color` with white at `alpha`, the opaque equivalent of a translucent fill
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn tint(color: Color, alpha: f64) -> Color {
        let mix = |c: u8| (f64::from(c) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Color::rgb(mix(color.r), mix(color.g), mix(color.b))
    }

    fn zone_id(id: &str) -> String {
        format!("zone_{}", Self::sanitize_id(id))
    }

    /// Sanitize a station name for use as a Mermaid node ID
    fn sanitize_id(key: &str) -> String {
        key.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}

impl ReportGenerator for MermaidGenerator {
    fn render(&self, network: &MetroNetwork) -> Result<String, MapError> {
        let panel = &network.panel;
        Ok(NETWORK_TEMPLATE
            .replace("{{title}}", &panel.title)
            .replace("{{subtitle}}", &panel.subtitle)
            .replace("{{mermaid}}", &Self::generate_network(network))
            .replace("{{zone_rows}}", &Self::zone_rows(network))
            .replace("{{route_list}}", &Self::route_list(network))
            .replace("{{transfer_list}}", &Self::transfer_list(network)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> MetroNetwork {
        MetroNetwork::builtin().unwrap()
    }

    #[test]
    fn test_mermaid_generation() {
        let diagram = MermaidGenerator::generate_network(&network());

        assert!(diagram.starts_with("```mermaid\nflowchart LR\n"));
        assert!(diagram.contains("subgraph zone_A[\"ZONE A\"]"));
        assert!(diagram.contains("Downtown_Central((\"Downtown<br/>Central\"))"));
        assert!(diagram.contains("Uptown_North ==>|Main Line| Downtown_Central"));
        assert!(diagram.contains("Eastside_Plaza ==>|East Connector| Southgate_Junction"));
        assert!(diagram.trim_end().ends_with("```"));
    }

    #[test]
    fn test_one_link_style_per_segment() {
        let network = network();
        let diagram = MermaidGenerator::generate_network(&network);
        let edges = diagram.matches("==>").count();
        let styles = diagram.matches("linkStyle").count();
        assert_eq!(edges, network.segment_positions().count());
        assert_eq!(edges, styles);
        assert!(diagram.contains(&format!("linkStyle {} ", edges - 1)));
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(MermaidGenerator::sanitize_id("Harbor View"), "Harbor_View");
        assert_eq!(MermaidGenerator::sanitize_id("Gate-7"), "Gate_7");
    }

    #[test]
    fn test_tint_blends_toward_white() {
        let red = Color::rgb(0xe7, 0x4c, 0x3c);
        assert_eq!(MermaidGenerator::tint(red, 1.0), red);
        assert_eq!(MermaidGenerator::tint(red, 0.0), Color::WHITE);
    }

    #[test]
    fn test_page_substitutes_every_placeholder() {
        let page = MermaidGenerator::new().render(&network()).unwrap();
        assert!(!page.contains("{{"));
        assert!(page.starts_with("# METRO SYSTEM MAP"));
        assert!(page.contains("| ZONE C | Southgate Junction, Airport Express |"));
        assert!(page.contains(
            "- **Harbor Line**: Harbor View → Westwood Terminal → Southgate Junction → Airport Express"
        ));
        assert!(page.contains("- Downtown Central (Main Line, Central Connector)"));
    }
}
