//! Drawing surface abstraction and the styles passed to it
//!
//! Coordinates are figure points (1/72 inch), origin top-left, y pointing down.
//! Text metrics are estimated from the font size so layout does not depend on
//! the fonts installed where the map is rendered.

use crate::core::models::{Color, Point, Rect};

/// Average glyph advance as a fraction of the font size
const REGULAR_ADVANCE: f64 = 0.6;
/// Average bold glyph advance as a fraction of the font size
const BOLD_ADVANCE: f64 = 0.66;
/// Ascent as a fraction of the font size
const ASCENT: f64 = 0.76;
/// Descent as a fraction of the font size
const DESCENT: f64 = 0.24;

/// A color with an opacity in `0..=1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Base color
    pub color: Color,
    /// Opacity, 1.0 is opaque
    pub opacity: f64,
}

impl Paint {
    /// Fully opaque paint
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    /// Paint with the given opacity
    #[must_use]
    pub const fn translucent(color: Color, opacity: f64) -> Self {
        Self { color, opacity }
    }
}

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke paint
    pub paint: Paint,
    /// Width in points
    pub width: f64,
}

impl Stroke {
    /// Opaque stroke
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            paint: Paint::solid(color),
            width,
        }
    }
}

/// Fill and outline of a closed shape
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapeStyle {
    /// Interior paint, `None` leaves the shape unfilled
    pub fill: Option<Paint>,
    /// Outline, `None` draws no border
    pub stroke: Option<Stroke>,
}

impl ShapeStyle {
    /// Filled shape without border
    #[must_use]
    pub const fn filled(paint: Paint) -> Self {
        Self {
            fill: Some(paint),
            stroke: None,
        }
    }

    /// Add a border
    #[must_use]
    pub const fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Half the stroke width, the distance the outline extends past the geometry
    #[must_use]
    pub fn outline_overhang(&self) -> f64 {
        self.stroke.map_or(0.0, |s| s.width / 2.0)
    }
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Origin is the left edge
    #[default]
    Start,
    /// Origin is the horizontal center
    Middle,
    /// Origin is the right edge
    End,
}

/// Vertical text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    /// Origin is the baseline
    #[default]
    Baseline,
    /// Origin is the top of the glyphs
    Top,
    /// Origin is the vertical center of the glyphs
    Center,
}

/// Rounded box drawn behind a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBackground {
    /// Box style
    pub style: ShapeStyle,
    /// Padding around the text as a fraction of the font size
    pub pad: f64,
}

/// Text appearance and anchoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f64,
    /// Bold weight
    pub bold: bool,
    /// Italic slant
    pub italic: bool,
    /// Glyph color
    pub color: Color,
    /// Horizontal anchoring
    pub anchor: TextAnchor,
    /// Vertical anchoring
    pub valign: VerticalAlign,
    /// Optional box behind the text
    pub background: Option<TextBackground>,
}

impl TextStyle {
    /// Regular black left-aligned text on the baseline
    #[must_use]
    pub const fn new(size: f64) -> Self {
        Self {
            size,
            bold: false,
            italic: false,
            color: Color::BLACK,
            anchor: TextAnchor::Start,
            valign: VerticalAlign::Baseline,
            background: None,
        }
    }

    /// Bold weight
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Italic slant
    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Glyph color
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Horizontal anchoring
    #[must_use]
    pub const fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Vertical anchoring
    #[must_use]
    pub const fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }

    /// Box behind the text
    #[must_use]
    pub const fn background(mut self, background: TextBackground) -> Self {
        self.background = Some(background);
        self
    }

    /// Estimated advance width of `content`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimated_width(&self, content: &str) -> f64 {
        let advance = if self.bold { BOLD_ADVANCE } else { REGULAR_ADVANCE };
        content.chars().count() as f64 * self.size * advance
    }

    /// Baseline y for text placed at `origin_y` with this style's alignment
    #[must_use]
    pub fn baseline(&self, origin_y: f64) -> f64 {
        match self.valign {
            VerticalAlign::Baseline => origin_y,
            VerticalAlign::Top => origin_y + ASCENT * self.size,
            VerticalAlign::Center => origin_y + (ASCENT - DESCENT) / 2.0 * self.size,
        }
    }

    /// Estimated box covering the glyphs of `content` placed at `origin`
    #[must_use]
    pub fn glyph_bounds(&self, origin: Point, content: &str) -> Rect {
        let width = self.estimated_width(content);
        let left = match self.anchor {
            TextAnchor::Start => origin.x,
            TextAnchor::Middle => origin.x - width / 2.0,
            TextAnchor::End => origin.x - width,
        };
        let top = self.baseline(origin.y) - ASCENT * self.size;
        Rect::new(left, top, width, self.size)
    }

    /// Background box of `content` placed at `origin`, if the style has one
    #[must_use]
    pub fn background_rect(&self, origin: Point, content: &str) -> Option<Rect> {
        self.background
            .map(|bg| self.glyph_bounds(origin, content).inflate(bg.pad * self.size))
    }

    /// Everything the text run paints, background and border included
    #[must_use]
    pub fn bounds(&self, origin: Point, content: &str) -> Rect {
        match (self.background, self.background_rect(origin, content)) {
            (Some(bg), Some(rect)) => rect.inflate(bg.style.outline_overhang()),
            _ => self.glyph_bounds(origin, content),
        }
    }
}

/// A surface that accepts the primitive drawing operations of the map
pub trait Canvas {
    /// Draw a circle
    fn circle(&mut self, center: Point, radius: f64, style: &ShapeStyle);

    /// Draw a straight line with round caps
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draw a rectangle, rounded when `corner_radius > 0`
    fn rect(&mut self, rect: Rect, corner_radius: f64, style: &ShapeStyle);

    /// Draw a single line of text, with its background box if the style has one
    fn text(&mut self, origin: Point, content: &str, style: &TextStyle);
}
