//! Error types for network validation, rendering, and export

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the network or producing map artifacts.
///
/// Variants fall into two families: configuration errors (inconsistent
/// network data or an unusable output request) and I/O errors (an artifact
/// could not be written). [`MapError::Export`] covers failures inside the
/// SVG parser, rasterizer, or PDF converter.
#[derive(Error, Debug)]
pub enum MapError {
    /// The embedded or supplied network document is not valid TOML for the schema
    #[error("Invalid network definition: {0}")]
    InvalidNetwork(String),

    /// A route references a station that is not declared
    #[error("Route {route:?} references unknown station {station:?}")]
    UnknownStation {
        /// Route name
        route: String,
        /// Missing station name
        station: String,
    },

    /// Two stations share the same name
    #[error("Station {0:?} is declared more than once")]
    DuplicateStation(String),

    /// Two zones share the same id
    #[error("Zone {0:?} is declared more than once")]
    DuplicateZone(String),

    /// A station references a zone that is not declared
    #[error("Station {station:?} references unknown zone {zone:?}")]
    UnknownZone {
        /// Station name
        station: String,
        /// Missing zone id
        zone: String,
    },

    /// A station lies outside the map viewport
    #[error("Station {station:?} at ({x}, {y}) lies outside the {width}x{height} map")]
    OutOfBounds {
        /// Station name
        station: String,
        /// X coordinate
        x: f64,
        /// Y coordinate
        y: f64,
        /// Viewport width
        width: f64,
        /// Viewport height
        height: f64,
    },

    /// A numeric field is outside its allowed range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The fare table lacks a header row or any data rows
    #[error("Fare table needs a header row and at least one fare tier")]
    MissingFareHeader,

    /// The output path has no extension or an unsupported one
    #[error("Unsupported output format for {}: use png, pdf, svg, md, or txt", .0.display())]
    UnsupportedFormat(PathBuf),

    /// An output artifact could not be created or written
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        /// Artifact path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The graphics backend failed to encode an artifact
    #[error("Failed to encode {format} output: {message}")]
    Export {
        /// Output format name
        format: String,
        /// Backend error message
        message: String,
    },
}

impl MapError {
    /// Whether this error stems from inconsistent data or an invalid output request
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Export { .. })
    }

    /// Whether this error stems from writing an artifact
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
