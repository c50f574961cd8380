//! Ordered draw operations making up the figure
//!
//! The panels append operations to a [`Scene`]; the scene is then replayed onto
//! a [`Canvas`]. Operations are applied in insertion order, so later ones
//! occlude earlier ones.

use super::canvas::{Canvas, ShapeStyle, Stroke, TextStyle};
use crate::core::models::{Point, Rect};

/// What a drawing operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Figure and panel titles
    Title,
    /// Zone circles and their labels
    Zone,
    /// Route segments
    Route,
    /// Station markers
    Station,
    /// Station name labels
    StationLabel,
    /// Fare, discount, and time-pricing blocks
    InfoPanel,
    /// Footer text
    Footer,
}

/// A single primitive drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Circle with fill and border
    Circle {
        /// Center
        center: Point,
        /// Radius
        radius: f64,
        /// Fill and border
        style: ShapeStyle,
    },
    /// Straight line
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke
        stroke: Stroke,
    },
    /// Rectangle, rounded when `corner_radius > 0`
    Rect {
        /// Geometry
        rect: Rect,
        /// Corner radius
        corner_radius: f64,
        /// Fill and border
        style: ShapeStyle,
    },
    /// One line of text
    Text {
        /// Anchor point
        origin: Point,
        /// Text content
        content: String,
        /// Appearance and anchoring
        style: TextStyle,
    },
}

impl DrawOp {
    /// Area painted by the operation, strokes included
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Circle {
                center,
                radius,
                style,
            } => Rect::around_circle(*center, *radius).inflate(style.outline_overhang()),
            Self::Line { from, to, stroke } => {
                Rect::from_corners(*from, *to).inflate(stroke.width / 2.0)
            }
            Self::Rect { rect, style, .. } => rect.inflate(style.outline_overhang()),
            Self::Text {
                origin,
                content,
                style,
            } => style.bounds(*origin, content),
        }
    }

    /// Replay the operation onto `canvas`
    pub fn apply(&self, canvas: &mut dyn Canvas) {
        match self {
            Self::Circle {
                center,
                radius,
                style,
            } => canvas.circle(*center, *radius, style),
            Self::Line { from, to, stroke } => canvas.line(*from, *to, stroke),
            Self::Rect {
                rect,
                corner_radius,
                style,
            } => canvas.rect(*rect, *corner_radius, style),
            Self::Text {
                origin,
                content,
                style,
            } => canvas.text(*origin, content, style),
        }
    }
}

/// A draw operation tagged with its layer
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    /// Layer the operation belongs to
    pub layer: Layer,
    /// The operation
    pub op: DrawOp,
}

/// The figure as an ordered list of draw operations
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Nominal figure size before cropping
    pub figure: Rect,
    items: Vec<SceneItem>,
}

impl Scene {
    /// Empty scene for a figure of the given size in points
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            figure: Rect::new(0.0, 0.0, width, height),
            items: Vec::new(),
        }
    }

    /// Append an operation
    pub fn push(&mut self, layer: Layer, op: DrawOp) {
        self.items.push(SceneItem { layer, op });
    }

    /// Append a circle
    pub fn circle(&mut self, layer: Layer, center: Point, radius: f64, style: ShapeStyle) {
        self.push(
            layer,
            DrawOp::Circle {
                center,
                radius,
                style,
            },
        );
    }

    /// Append a line
    pub fn line(&mut self, layer: Layer, from: Point, to: Point, stroke: Stroke) {
        self.push(layer, DrawOp::Line { from, to, stroke });
    }

    /// Append a rectangle
    pub fn rect(&mut self, layer: Layer, rect: Rect, corner_radius: f64, style: ShapeStyle) {
        self.push(
            layer,
            DrawOp::Rect {
                rect,
                corner_radius,
                style,
            },
        );
    }

    /// Append a line of text
    pub fn text(&mut self, layer: Layer, origin: Point, content: &str, style: TextStyle) {
        self.push(
            layer,
            DrawOp::Text {
                origin,
                content: content.to_string(),
                style,
            },
        );
    }

    /// Operations in drawing order
    #[must_use]
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Number of operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the scene has no operations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Operations of one layer, in drawing order
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawOp> {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.op)
    }

    /// Text content of every text operation, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match &item.op {
            DrawOp::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Union of everything painted, or the nominal figure when empty
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        self.items
            .iter()
            .map(|item| item.op.bounds())
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or(self.figure)
    }

    /// Tight crop: content bounds plus `pad` on every side
    #[must_use]
    pub fn tight_bounds(&self, pad: f64) -> Rect {
        self.content_bounds().inflate(pad)
    }

    /// Replay every operation onto `canvas` in order
    pub fn render_to(&self, canvas: &mut dyn Canvas) {
        for item in &self.items {
            item.op.apply(canvas);
        }
    }
}
