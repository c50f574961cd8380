//! Core module: network data, rendering, and configuration

pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod report;

pub use error::MapError;
pub use models::MetroNetwork;
pub use render::{Artifact, MetroMapRenderer, OutputFormat, RenderOptions};

/// Returns the current version of the `metromap` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
