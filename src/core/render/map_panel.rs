//! Left panel: zone circles, route segments, and station markers

use super::canvas::{
    Paint, ShapeStyle, Stroke, TextAnchor, TextBackground, TextStyle, VerticalAlign,
};
use super::layout::{DataTransform, MAP_TITLE_PAD, MAP_TITLE_SIZE};
use super::scene::{Layer, Scene};
use crate::core::models::{Color, MetroNetwork, Point, Rect};

/// Zone circle border width in points
const ZONE_EDGE_WIDTH: f64 = 3.0;
/// Zone circle border opacity
const ZONE_EDGE_ALPHA: f64 = 0.6;
/// Gap between a zone circle and its label, in map units
const ZONE_LABEL_GAP: f64 = 0.3;
const ZONE_LABEL_SIZE: f64 = 16.0;

/// Station marker radius in map units
const STATION_RADIUS: f64 = 0.15;
const STATION_EDGE_WIDTH: f64 = 3.0;
/// Distance from a station to the top of its label, in map units
const STATION_LABEL_OFFSET: f64 = 0.4;
const STATION_LABEL_SIZE: f64 = 10.0;
const STATION_LABEL_ALPHA: f64 = 0.8;
const STATION_LABEL_PAD: f64 = 0.3;

/// Append the network map to `scene`, fitted inside `panel`
pub fn draw(scene: &mut Scene, network: &MetroNetwork, panel: Rect) {
    let t = DataTransform::fit(panel, network.map);

    scene.text(
        Layer::Title,
        Point::new(panel.center().x, t.top() - MAP_TITLE_PAD),
        &network.panel.map_title,
        TextStyle::new(MAP_TITLE_SIZE)
            .bold()
            .anchor(TextAnchor::Middle),
    );

    for zone in &network.zones {
        let style = ShapeStyle::filled(Paint::translucent(zone.color, zone.alpha)).with_stroke(
            Stroke {
                paint: Paint::translucent(zone.color, ZONE_EDGE_ALPHA),
                width: ZONE_EDGE_WIDTH,
            },
        );
        scene.circle(
            Layer::Zone,
            t.to_figure(zone.center),
            t.length(zone.radius),
            style,
        );
        scene.text(
            Layer::Zone,
            t.to_figure(zone.center.offset(0.0, zone.radius + ZONE_LABEL_GAP)),
            &zone.label(),
            TextStyle::new(ZONE_LABEL_SIZE)
                .bold()
                .color(zone.color)
                .anchor(TextAnchor::Middle),
        );
    }

    for (route, from, to) in network.segment_positions() {
        scene.line(
            Layer::Route,
            t.to_figure(from),
            t.to_figure(to),
            Stroke {
                paint: Paint::translucent(route.color, route.alpha),
                width: route.width,
            },
        );
    }

    let marker_radius = t.length(STATION_RADIUS);
    for station in &network.stations {
        let style = ShapeStyle::filled(Paint::solid(station.color))
            .with_stroke(Stroke::new(Color::WHITE, STATION_EDGE_WIDTH));
        scene.circle(
            Layer::Station,
            t.to_figure(station.position),
            marker_radius,
            style,
        );
    }

    // Labels after all markers so no marker covers a neighbour's label
    let label_box = TextBackground {
        style: ShapeStyle::filled(Paint::translucent(Color::WHITE, STATION_LABEL_ALPHA))
            .with_stroke(Stroke {
                paint: Paint::translucent(Color::GRAY, STATION_LABEL_ALPHA),
                width: 1.0,
            }),
        pad: STATION_LABEL_PAD,
    };
    let label_style = TextStyle::new(STATION_LABEL_SIZE)
        .bold()
        .anchor(TextAnchor::Middle)
        .valign(VerticalAlign::Top)
        .background(label_box);
    for station in &network.stations {
        scene.text(
            Layer::StationLabel,
            t.to_figure(station.position.offset(0.0, -STATION_LABEL_OFFSET)),
            &station.name,
            label_style,
        );
    }
}
