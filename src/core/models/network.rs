//! The complete metro network shown on the station map

use super::geometry::Point;
use super::station::{Station, Zone};
use super::route::Route;
use super::tables::{DiscountRow, FareRow, PanelText, TimePricingRow};
use crate::core::error::MapError;
use logger::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Network compiled into the binary
const BUILTIN_NETWORK: &str = include_str!("../../assets/metro_network.toml");

/// Extent of the map viewport in map units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapExtent {
    /// Viewport width (x runs over `0..=width`)
    pub width: f64,
    /// Viewport height (y runs over `0..=height`)
    pub height: f64,
}

impl MapExtent {
    /// Whether `point` lies inside the viewport (edges included)
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Immutable description of everything drawn on the map
///
/// Built once, validated, and passed explicitly to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetroNetwork {
    /// Map viewport
    pub map: MapExtent,
    /// Titles, headings, and footer
    pub panel: PanelText,
    /// Fare zones in drawing order
    pub zones: Vec<Zone>,
    /// Stations in drawing order
    pub stations: Vec<Station>,
    /// Routes in drawing order
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Fare table, header row first
    pub fares: Vec<FareRow>,
    /// Passenger discounts
    #[serde(default)]
    pub discounts: Vec<DiscountRow>,
    /// Time-based pricing periods
    #[serde(default)]
    pub time_pricing: Vec<TimePricingRow>,
}

impl MetroNetwork {
    /// Load the network compiled into the binary
    ///
    /// # Errors
    /// Returns a configuration error if the embedded document is inconsistent
    pub fn builtin() -> Result<Self, MapError> {
        Self::from_toml(BUILTIN_NETWORK)
    }

    /// Parse and validate a network from a TOML document
    ///
    /// # Errors
    /// Returns [`MapError::InvalidNetwork`] if the document does not match the
    /// schema, or the first consistency error found by [`validate`](Self::validate)
    pub fn from_toml(toml_str: &str) -> Result<Self, MapError> {
        let network: Self =
            toml::from_str(toml_str).map_err(|e| MapError::InvalidNetwork(e.to_string()))?;
        network.validate()?;
        debug!(
            "Network loaded: {} zones, {} stations, {} routes",
            network.zones.len(),
            network.stations.len(),
            network.routes.len()
        );
        Ok(network)
    }

    /// Check the cross-references and ranges the renderer relies on
    ///
    /// # Errors
    /// Returns the first inconsistency found: duplicate names, unknown zone or
    /// station references, out-of-viewport stations, out-of-range numbers, or a
    /// fare table without data rows
    pub fn validate(&self) -> Result<(), MapError> {
        if !(self.map.width > 0.0 && self.map.height > 0.0) {
            return Err(MapError::invalid("map", "width and height must be positive"));
        }

        let mut zone_ids = HashSet::new();
        for zone in &self.zones {
            if !zone_ids.insert(zone.id.as_str()) {
                return Err(MapError::DuplicateZone(zone.id.clone()));
            }
            if zone.radius <= 0.0 {
                return Err(MapError::invalid(
                    format!("zones.{}.radius", zone.id),
                    "must be positive",
                ));
            }
            check_alpha(&format!("zones.{}.alpha", zone.id), zone.alpha)?;
        }

        let mut names = HashSet::new();
        for station in &self.stations {
            if !names.insert(station.name.as_str()) {
                return Err(MapError::DuplicateStation(station.name.clone()));
            }
            let Some(zone) = self.zone(&station.zone) else {
                return Err(MapError::UnknownZone {
                    station: station.name.clone(),
                    zone: station.zone.clone(),
                });
            };
            if !self.map.contains(station.position) {
                return Err(MapError::OutOfBounds {
                    station: station.name.clone(),
                    x: station.position.x,
                    y: station.position.y,
                    width: self.map.width,
                    height: self.map.height,
                });
            }
            // Zone circles are drawn loosely around their stations
            if !zone.encloses(station.position) {
                debug!(
                    "Station '{}' is drawn outside the circle of zone {}",
                    station.name, zone.id
                );
            }
        }

        for route in &self.routes {
            if let Some(missing) = route.stations.iter().find(|s| !names.contains(s.as_str())) {
                return Err(MapError::UnknownStation {
                    route: route.name.clone(),
                    station: missing.clone(),
                });
            }
            if route.width <= 0.0 {
                return Err(MapError::invalid(
                    format!("routes.{}.width", route.name),
                    "must be positive",
                ));
            }
            check_alpha(&format!("routes.{}.alpha", route.name), route.alpha)?;
        }

        if self.fares.len() < 2 {
            return Err(MapError::MissingFareHeader);
        }

        Ok(())
    }

    /// Look up a station by name
    #[must_use]
    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Look up a zone by id
    #[must_use]
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Stations of a zone, in declaration order
    pub fn stations_in_zone<'a>(&'a self, zone_id: &'a str) -> impl Iterator<Item = &'a Station> {
        self.stations.iter().filter(move |s| s.zone == zone_id)
    }

    /// Routes serving a station, in declaration order
    pub fn routes_through<'a>(&'a self, station: &'a str) -> impl Iterator<Item = &'a Route> {
        self.routes
            .iter()
            .filter(move |r| r.stations.iter().any(|s| s == station))
    }

    /// Fare table header row
    #[must_use]
    pub fn fare_header(&self) -> Option<&FareRow> {
        self.fares.first()
    }

    /// Fare rows below the header
    #[must_use]
    pub fn fare_tiers(&self) -> &[FareRow] {
        self.fares.get(1..).unwrap_or_default()
    }

    /// Resolve every segment of every route to its endpoint positions
    ///
    /// Only meaningful on a validated network; unknown names are skipped.
    pub fn segment_positions(&self) -> impl Iterator<Item = (&Route, Point, Point)> {
        self.routes.iter().flat_map(move |route| {
            route.segments().filter_map(move |(from, to)| {
                Some((
                    route,
                    self.station(from)?.position,
                    self.station(to)?.position,
                ))
            })
        })
    }
}

fn check_alpha(field: &str, alpha: f64) -> Result<(), MapError> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(MapError::invalid(field, format!("{alpha} is outside 0..=1")))
    }
}
