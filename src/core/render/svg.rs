//! SVG implementation of [`Canvas`]
//!
//! The SVG document is the single source every export is derived from: it is
//! written as-is for `.svg`, rasterized for `.png`, and converted for `.pdf`.
//! User units are points.

use super::canvas::{Canvas, Paint, ShapeStyle, Stroke, TextAnchor, TextStyle};
use crate::core::models::{Color, Point, Rect};

const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Escape XML special characters
#[must_use]
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Collects drawing calls as SVG elements
#[derive(Debug, Default)]
pub struct SvgCanvas {
    body: String,
}

impl SvgCanvas {
    /// Empty canvas
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the collected elements in a document showing `view`, on white
    #[must_use]
    pub fn finish(self, view: Rect) -> String {
        let mut svg = String::with_capacity(self.body.len() + 512);
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.2}" height="{:.2}" viewBox="{:.2} {:.2} {:.2} {:.2}">"#,
            view.width, view.height, view.x, view.y, view.width, view.height
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            view.x,
            view.y,
            view.width,
            view.height,
            Color::WHITE
        ));
        svg.push('\n');
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn shape_attrs(style: &ShapeStyle) -> String {
        let mut attrs = style.fill.map_or_else(
            || r#" fill="none""#.to_string(),
            |paint| paint_attrs("fill", paint),
        );
        if let Some(stroke) = style.stroke {
            attrs.push_str(&stroke_attrs(&stroke));
        }
        attrs
    }
}

fn paint_attrs(attr: &str, paint: Paint) -> String {
    if paint.opacity < 1.0 {
        format!(
            r#" {attr}="{}" {attr}-opacity="{:.2}""#,
            paint.color, paint.opacity
        )
    } else {
        format!(r#" {attr}="{}""#, paint.color)
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        r#"{} stroke-width="{:.2}""#,
        paint_attrs("stroke", stroke.paint),
        stroke.width
    )
}

impl Canvas for SvgCanvas {
    fn circle(&mut self, center: Point, radius: f64, style: &ShapeStyle) {
        self.body.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}"{}/>"#,
            center.x,
            center.y,
            radius,
            Self::shape_attrs(style)
        ));
        self.body.push('\n');
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.body.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"{} stroke-linecap="round"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attrs(stroke)
        ));
        self.body.push('\n');
    }

    fn rect(&mut self, rect: Rect, corner_radius: f64, style: &ShapeStyle) {
        let rounding = if corner_radius > 0.0 {
            format!(r#" rx="{corner_radius:.2}""#)
        } else {
            String::new()
        };
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}{}/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            rounding,
            Self::shape_attrs(style)
        ));
        self.body.push('\n');
    }

    fn text(&mut self, origin: Point, content: &str, style: &TextStyle) {
        if let (Some(bg), Some(rect)) = (style.background, style.background_rect(origin, content)) {
            self.rect(rect, bg.pad * style.size, &bg.style);
        }

        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let mut attrs = String::new();
        if style.bold {
            attrs.push_str(r#" font-weight="bold""#);
        }
        if style.italic {
            attrs.push_str(r#" font-style="italic""#);
        }
        self.body.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}"{} fill="{}" text-anchor="{}">{}</text>"#,
            origin.x,
            style.baseline(origin.y),
            FONT_FAMILY,
            style.size,
            attrs,
            style.color,
            anchor,
            escape_xml(content)
        ));
        self.body.push('\n');
    }
}
