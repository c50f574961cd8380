//! Figure geometry: panel placement and the coordinate transforms of each panel
//!
//! All figure coordinates are points, origin top-left, y down. The map panel
//! uses data coordinates (origin bottom-left, y up) scaled at equal aspect;
//! the info panel uses normalized `0..=1` axes coordinates.

use crate::core::models::{MapExtent, Point, Rect};

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Figure width: 20 inches
pub const FIGURE_WIDTH: f64 = 20.0 * POINTS_PER_INCH;
/// Figure height: 12 inches
pub const FIGURE_HEIGHT: f64 = 12.0 * POINTS_PER_INCH;

/// Padding kept around the content when cropping: 0.1 inch
pub const CROP_PADDING: f64 = 0.1 * POINTS_PER_INCH;

/// Font size of the two-line figure title
pub const TITLE_SIZE: f64 = 28.0;
/// Top of the figure title, 5% below the figure's top edge
pub const TITLE_TOP: f64 = 0.05 * FIGURE_HEIGHT;
/// Distance between baselines of multi-line text, as a multiple of font size
pub const LINE_SPACING: f64 = 1.2;

/// Font size of the map panel title
pub const MAP_TITLE_SIZE: f64 = 20.0;
/// Gap between the map title baseline and the top of the map data area
pub const MAP_TITLE_PAD: f64 = 20.0;

const MARGIN: f64 = 20.0;
const PANEL_GAP: f64 = 20.0;
const PANEL_TOP: f64 = 175.0;

/// Placement of the title band and the two panels on the figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLayout {
    /// Full figure
    pub figure: Rect,
    /// Network map panel (left)
    pub map: Rect,
    /// Information panel (right)
    pub info: Rect,
}

impl FigureLayout {
    /// Layout of the 20 x 12 inch station display
    #[must_use]
    pub fn station_display() -> Self {
        let panel_width = (FIGURE_WIDTH - 2.0 * MARGIN - PANEL_GAP) / 2.0;
        let panel_height = FIGURE_HEIGHT - PANEL_TOP - MARGIN;
        Self {
            figure: Rect::new(0.0, 0.0, FIGURE_WIDTH, FIGURE_HEIGHT),
            map: Rect::new(MARGIN, PANEL_TOP, panel_width, panel_height),
            info: Rect::new(
                MARGIN + panel_width + PANEL_GAP,
                PANEL_TOP,
                panel_width,
                panel_height,
            ),
        }
    }

    /// Top edge of the given figure title line
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn title_line_top(&self, line: usize) -> f64 {
        self.figure.y + TITLE_TOP + line as f64 * LINE_SPACING * TITLE_SIZE
    }
}

/// Maps data coordinates onto a panel at equal aspect, centered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataTransform {
    origin_x: f64,
    top_y: f64,
    data_height: f64,
    scale: f64,
}

impl DataTransform {
    /// Fit `extent` inside `panel`, keeping one data unit equal on both axes
    #[must_use]
    pub fn fit(panel: Rect, extent: MapExtent) -> Self {
        let scale = (panel.width / extent.width).min(panel.height / extent.height);
        let used_w = extent.width * scale;
        let used_h = extent.height * scale;
        Self {
            origin_x: panel.x + (panel.width - used_w) / 2.0,
            top_y: panel.y + (panel.height - used_h) / 2.0,
            data_height: extent.height,
            scale,
        }
    }

    /// Points per data unit
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Figure position of a data point (data y grows upward)
    #[must_use]
    pub fn to_figure(&self, p: Point) -> Point {
        Point::new(
            self.origin_x + p.x * self.scale,
            self.top_y + (self.data_height - p.y) * self.scale,
        )
    }

    /// Length of `units` data units in points
    #[must_use]
    pub fn length(&self, units: f64) -> f64 {
        units * self.scale
    }

    /// Figure y of the top edge of the data area
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.top_y
    }
}

/// Maps normalized axes coordinates (`0..=1`, origin bottom-left) onto a panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesTransform {
    panel: Rect,
}

impl AxesTransform {
    /// Transform for `panel`
    #[must_use]
    pub const fn new(panel: Rect) -> Self {
        Self { panel }
    }

    /// Figure position of axes point `(u, v)`
    #[must_use]
    pub fn point(&self, u: f64, v: f64) -> Point {
        Point::new(
            self.panel.x + u * self.panel.width,
            self.panel.bottom() - v * self.panel.height,
        )
    }

    /// Figure rectangle of an axes box with lower-left corner `(u, v)`
    #[must_use]
    pub fn rect(&self, u: f64, v: f64, w: f64, h: f64) -> Rect {
        Rect::new(
            self.panel.x + u * self.panel.width,
            self.panel.bottom() - (v + h) * self.panel.height,
            w * self.panel.width,
            h * self.panel.height,
        )
    }

    /// Axes box grown by `pad` axes units on every side, with its corner radius
    #[must_use]
    pub fn padded_rect(&self, u: f64, v: f64, w: f64, h: f64, pad: f64) -> (Rect, f64) {
        let rect = self.rect(u - pad, v - pad, w + 2.0 * pad, h + 2.0 * pad);
        (rect, pad * self.panel.height)
    }
}
