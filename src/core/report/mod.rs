//! Text documents describing the network
//!
//! Besides the drawn figure, the network can be exported as a Markdown page
//! with a Mermaid diagram and as a plain-text fare guide for printing at
//! ticket counters.

pub mod guide;
pub mod mermaid;

use crate::core::error::MapError;
use crate::core::models::MetroNetwork;

pub use guide::FareGuide;
pub use mermaid::MermaidGenerator;

/// Trait for text document generators
pub trait ReportGenerator {
    /// Generate document content as a string
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, network: &MetroNetwork) -> Result<String, MapError>;
}

/// Names of the routes serving `station`, joined with commas
pub(crate) fn route_names(network: &MetroNetwork, station: &str) -> String {
    network
        .routes_through(station)
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_names() {
        let network = MetroNetwork::builtin().unwrap();
        assert_eq!(
            route_names(&network, "Eastside Plaza"),
            "Main Line, East Connector"
        );
        assert_eq!(route_names(&network, "Airport Express"), "Harbor Line");
    }
}
