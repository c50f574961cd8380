//! Right panel: fare table, passenger discounts, time-based pricing, and footer
//!
//! Everything here is placed in normalized axes coordinates, `(0, 0)` at the
//! bottom-left of the panel and `(1, 1)` at its top-right.

use super::canvas::{Paint, ShapeStyle, Stroke, TextAnchor, TextStyle};
use super::layout::{AxesTransform, LINE_SPACING};
use super::scene::{Layer, Scene};
use crate::core::models::{Color, MetroNetwork, Rect};

const HEADING_COLOR: Color = Color::rgb(0x2c, 0x3e, 0x50);
const FARE_HEADER_FILL: Color = Color::rgb(0x34, 0x49, 0x5e);
const STRIPE_FILL: Color = Color::rgb(0xf8, 0xf9, 0xfa);
const TIME_FILL: Color = Color::rgb(0xec, 0xf0, 0xf1);
const FOOTER_COLOR: Color = Color::rgb(0x7f, 0x8c, 0x8d);

const HEADING_SIZE: f64 = 18.0;
const SECTION_LEFT: f64 = 0.1;
const SECTION_WIDTH: f64 = 0.8;
const TEXT_LEFT: f64 = 0.15;
const BOX_PAD: f64 = 0.01;

const FARE_HEADING_V: f64 = 0.95;
const FARE_TOP: f64 = 0.85;
const FARE_STEP: f64 = 0.08;
const FARE_ROW_HEIGHT: f64 = 0.06;
const FARE_PRICE_U: f64 = 0.7;

const DISCOUNT_HEADING_V: f64 = 0.65;
const DISCOUNT_TOP: f64 = 0.55;
const DISCOUNT_STEP: f64 = 0.06;
const DISCOUNT_ROW_HEIGHT: f64 = 0.04;
const BADGE_U: f64 = 0.7;
const BADGE_WIDTH: f64 = 0.15;
const BADGE_HEIGHT: f64 = 0.03;
const BADGE_PAD: f64 = 0.005;

const TIME_HEADING_V: f64 = 0.35;
const TIME_TOP: f64 = 0.25;
const TIME_STEP: f64 = 0.08;
const TIME_ROW_HEIGHT: f64 = 0.06;
const TIME_LABEL_U: f64 = 0.75;
const ACCENT_U: f64 = 0.11;
const ACCENT_WIDTH: f64 = 0.01;
const ACCENT_HEIGHT: f64 = 0.05;

const FOOTER_V: f64 = 0.02;
const FOOTER_SIZE: f64 = 10.0;

/// Append the information panel to `scene`, placed inside `panel`
pub fn draw(scene: &mut Scene, network: &MetroNetwork, panel: Rect) {
    let axes = AxesTransform::new(panel);
    draw_fares(scene, network, &axes);
    draw_discounts(scene, network, &axes);
    draw_time_pricing(scene, network, &axes);
    draw_footer(scene, &network.panel.footer, &axes);
}

fn heading(scene: &mut Scene, axes: &AxesTransform, v: f64, content: &str) {
    scene.text(
        Layer::InfoPanel,
        axes.point(SECTION_LEFT, v),
        content,
        TextStyle::new(HEADING_SIZE).bold().color(HEADING_COLOR),
    );
}

#[allow(clippy::cast_precision_loss)]
fn row_v(top: f64, step: f64, index: usize) -> f64 {
    top - index as f64 * step
}

fn draw_fares(scene: &mut Scene, network: &MetroNetwork, axes: &AxesTransform) {
    heading(scene, axes, FARE_HEADING_V, &network.panel.fare_heading);

    for (i, row) in network.fares.iter().enumerate() {
        let v = row_v(FARE_TOP, FARE_STEP, i);
        let (rect, corner) = axes.padded_rect(
            SECTION_LEFT,
            v - FARE_ROW_HEIGHT / 2.0,
            SECTION_WIDTH,
            FARE_ROW_HEIGHT,
            BOX_PAD,
        );

        let (tier_style, price_style) = if i == 0 {
            scene.rect(
                Layer::InfoPanel,
                rect,
                corner,
                ShapeStyle::filled(Paint::solid(FARE_HEADER_FILL)),
            );
            let header = TextStyle::new(12.0).bold().color(Color::WHITE);
            (header, header)
        } else {
            if i % 2 == 0 {
                scene.rect(
                    Layer::InfoPanel,
                    rect,
                    corner,
                    ShapeStyle::filled(Paint::solid(STRIPE_FILL)),
                );
            }
            (TextStyle::new(11.0), TextStyle::new(11.0).bold())
        };

        scene.text(Layer::InfoPanel, axes.point(TEXT_LEFT, v), &row.tier, tier_style);
        scene.text(
            Layer::InfoPanel,
            axes.point(FARE_PRICE_U, v),
            &row.price,
            price_style,
        );
    }
}

fn draw_discounts(scene: &mut Scene, network: &MetroNetwork, axes: &AxesTransform) {
    heading(scene, axes, DISCOUNT_HEADING_V, &network.panel.discount_heading);

    let row_style = ShapeStyle::filled(Paint::solid(Color::WHITE))
        .with_stroke(Stroke::new(Color::GRAY, 0.5));
    for (i, row) in network.discounts.iter().enumerate() {
        let v = row_v(DISCOUNT_TOP, DISCOUNT_STEP, i);
        let (rect, corner) = axes.padded_rect(
            SECTION_LEFT,
            v - DISCOUNT_ROW_HEIGHT / 2.0,
            SECTION_WIDTH,
            DISCOUNT_ROW_HEIGHT,
            BOX_PAD,
        );
        scene.rect(Layer::InfoPanel, rect, corner, row_style);
        scene.text(
            Layer::InfoPanel,
            axes.point(TEXT_LEFT, v),
            &row.category,
            TextStyle::new(12.0).bold(),
        );

        let (badge, badge_corner) = axes.padded_rect(
            BADGE_U,
            v - BADGE_HEIGHT / 2.0,
            BADGE_WIDTH,
            BADGE_HEIGHT,
            BADGE_PAD,
        );
        scene.rect(
            Layer::InfoPanel,
            badge,
            badge_corner,
            ShapeStyle::filled(Paint::solid(row.color)),
        );
        scene.text(
            Layer::InfoPanel,
            axes.point(BADGE_U + BADGE_WIDTH / 2.0, v),
            &row.discount,
            TextStyle::new(10.0)
                .bold()
                .color(Color::WHITE)
                .anchor(TextAnchor::Middle),
        );
    }
}

fn draw_time_pricing(scene: &mut Scene, network: &MetroNetwork, axes: &AxesTransform) {
    heading(scene, axes, TIME_HEADING_V, &network.panel.time_heading);

    for (i, row) in network.time_pricing.iter().enumerate() {
        let v = row_v(TIME_TOP, TIME_STEP, i);
        let (rect, corner) = axes.padded_rect(
            SECTION_LEFT,
            v - TIME_ROW_HEIGHT / 2.0,
            SECTION_WIDTH,
            TIME_ROW_HEIGHT,
            BOX_PAD,
        );
        scene.rect(
            Layer::InfoPanel,
            rect,
            corner,
            ShapeStyle::filled(Paint::solid(TIME_FILL)).with_stroke(Stroke::new(row.color, 3.0)),
        );
        scene.rect(
            Layer::InfoPanel,
            axes.rect(ACCENT_U, v - ACCENT_HEIGHT / 2.0, ACCENT_WIDTH, ACCENT_HEIGHT),
            0.0,
            ShapeStyle::filled(Paint::solid(row.color)),
        );

        scene.text(
            Layer::InfoPanel,
            axes.point(TEXT_LEFT, v + 0.01),
            &row.period,
            TextStyle::new(12.0).bold(),
        );
        scene.text(
            Layer::InfoPanel,
            axes.point(TEXT_LEFT, v - 0.01),
            &row.hours,
            TextStyle::new(10.0),
        );
        scene.text(
            Layer::InfoPanel,
            axes.point(TIME_LABEL_U, v),
            &row.label,
            TextStyle::new(11.0)
                .bold()
                .color(row.color)
                .anchor(TextAnchor::Middle),
        );
    }
}

/// Footer lines flowing downward from a first baseline at `FOOTER_V`
#[allow(clippy::cast_precision_loss)]
fn draw_footer(scene: &mut Scene, lines: &[String], axes: &AxesTransform) {
    let style = TextStyle::new(FOOTER_SIZE)
        .italic()
        .color(FOOTER_COLOR)
        .anchor(TextAnchor::Middle);
    let first_baseline = axes.point(0.5, FOOTER_V);
    for (i, line) in lines.iter().enumerate() {
        let origin = first_baseline.offset(0.0, i as f64 * LINE_SPACING * FOOTER_SIZE);
        scene.text(Layer::Footer, origin, line, style);
    }
}
