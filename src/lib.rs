//! Shared library for `metromap`
//! Lays out the metro system map for station displays and exports it as PNG,
//! PDF, SVG, a Mermaid page, or a plain-text fare guide.

pub mod core;

pub use crate::core::*;
