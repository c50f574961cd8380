//! Command handlers for the `metromap` CLI

pub mod config;
pub mod render;
