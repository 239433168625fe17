// crates/citycompare-core/src/map.rs

//! # Map Surface
//!
//! The renderer drives a map through [`MapSurface`] and never draws pixels
//! itself. A real map widget, a tile server overlay or the
//! [`RecordingMap`] used by the CLI and the tests can sit behind it.

use crate::model::Coordinates;
use serde::Serialize;
use serde_json::{json, Value};

/// Stroke of the line connecting the two cities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    /// SVG dash pattern, e.g. `"5, 10"`.
    pub dash_array: String,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#3498db".to_string(),
            weight: 2,
            opacity: 0.8,
            dash_array: "5, 10".to_string(),
        }
    }
}

/// Axis-aligned bounds that contain every given point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl MapBounds {
    pub fn around(a: Coordinates, b: Coordinates) -> Self {
        Self {
            south: a.lat().min(b.lat()),
            west: a.lon().min(b.lon()),
            north: a.lat().max(b.lat()),
            east: a.lon().max(b.lon()),
        }
    }

    pub fn contains(&self, c: Coordinates) -> bool {
        (self.south..=self.north).contains(&c.lat()) && (self.west..=self.east).contains(&c.lon())
    }
}

/// Operations the renderer needs from a map.
pub trait MapSurface {
    /// Remove every marker and line added so far.
    fn clear(&mut self);
    fn add_marker(&mut self, at: Coordinates, popup: &str);
    fn add_line(&mut self, from: Coordinates, to: Coordinates, style: &LineStyle);
    fn fit_bounds(&mut self, bounds: MapBounds, padding_px: u32);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub at: Coordinates,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub from: Coordinates,
    pub to: Coordinates,
    pub style: LineStyle,
}

/// In-memory map that keeps whatever was drawn last.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordingMap {
    pub markers: Vec<Marker>,
    pub lines: Vec<Line>,
    pub view: Option<(MapBounds, u32)>,
    /// Number of `clear` calls, so callers can tell an untouched map apart.
    pub clears: usize,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.lines.is_empty()
    }

    /// Current overlays as a GeoJSON `FeatureCollection`.
    ///
    /// Positions follow GeoJSON order, `[lon, lat]`.
    pub fn to_geojson(&self) -> Value {
        let position = |c: Coordinates| json!([c.lon(), c.lat()]);

        let markers = self.markers.iter().map(|m| {
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": position(m.at) },
                "properties": { "name": m.popup },
            })
        });
        let lines = self.lines.iter().map(|l| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [position(l.from), position(l.to)],
                },
                "properties": {
                    "stroke": l.style.color,
                    "stroke-width": l.style.weight,
                    "stroke-opacity": l.style.opacity,
                    "dashArray": l.style.dash_array,
                },
            })
        });

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": markers.chain(lines).collect::<Vec<_>>(),
        });
        if let Some((b, _)) = self.view {
            collection["bbox"] = json!([b.west, b.south, b.east, b.north]);
        }
        collection
    }
}

impl MapSurface for RecordingMap {
    fn clear(&mut self) {
        self.markers.clear();
        self.lines.clear();
        self.view = None;
        self.clears += 1;
    }

    fn add_marker(&mut self, at: Coordinates, popup: &str) {
        self.markers.push(Marker {
            at,
            popup: popup.to_string(),
        });
    }

    fn add_line(&mut self, from: Coordinates, to: Coordinates, style: &LineStyle) {
        self.lines.push(Line {
            from,
            to,
            style: style.clone(),
        });
    }

    fn fit_bounds(&mut self, bounds: MapBounds, padding_px: u32) {
        self.view = Some((bounds, padding_px));
    }
}
