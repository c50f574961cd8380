//! Data models for the metro network

pub mod geometry;
pub mod network;
pub mod route;
pub mod station;
pub mod tables;

pub use geometry::{Color, Point, Rect};
pub use network::{MapExtent, MetroNetwork};
pub use route::Route;
pub use station::{Station, Zone};
pub use tables::{DiscountRow, FareRow, PanelText, PricingEffect, TimePricingRow};
