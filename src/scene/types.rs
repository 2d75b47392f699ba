use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use crate::projection::ScreenPoint;

pub const BACKGROUND: &str = "#001224";
pub const RIM: &str = "#38554d";
pub const HORIZON_TOP: &str = "#374553";
pub const GRID: &str = "#ccc";
pub const GRID_LABEL: &str = "#999";
pub const LABEL: &str = "white";
pub const PASS_LABEL: &str = "#eee";
pub const PASS_MUTED: &str = "red";
pub const PASS_VISIBLE: &str = "green";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    Solid { color: String },
    /// Top-to-bottom gradient across the shape.
    Gradient { top: String, bottom: String },
}

impl Fill {
    pub fn solid(color: &str) -> Self {
        Fill::Solid {
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
    pub color: String,
}

impl Font {
    pub fn new(size: f64, color: &str) -> Self {
        Self {
            size,
            bold: false,
            color: color.to_string(),
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// A drawable primitive in view pixels.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        origin: ScreenPoint,
        width: f64,
        height: f64,
        fill: Fill,
    },
    Circle {
        center: ScreenPoint,
        radius: f64,
        stroke: Option<Stroke>,
        fill: Option<Fill>,
    },
    Line {
        points: Vec<ScreenPoint>,
        stroke: Stroke,
    },
    Text {
        at: ScreenPoint,
        text: String,
        font: Font,
    },
    Image {
        at: ScreenPoint,
        size: f64,
        image: String,
    },
}

impl Shape {
    pub fn text(at: ScreenPoint, text: impl Into<String>, font: Font) -> Self {
        Shape::Text {
            at,
            text: text.into(),
            font,
        }
    }

    pub fn line(points: Vec<ScreenPoint>, stroke: Stroke) -> Self {
        Shape::Line { points, stroke }
    }
}

/// Clickable area of a satellite icon.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MarkerHit {
    pub catalog_number: u32,
    pub origin: ScreenPoint,
    pub size: f64,
}

impl MarkerHit {
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Layer {
    Background,
    Planets,
    Passes,
    Satellites,
    Info,
}

/// Everything drawn in one cycle, grouped by layer from back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Vec<Shape>,
    pub planets: Vec<Shape>,
    pub passes: Vec<Shape>,
    pub satellites: Vec<Shape>,
    pub info: Vec<Shape>,
    pub markers: Vec<MarkerHit>,
}

impl Scene {
    pub fn set_layer(&mut self, layer: Layer, shapes: Vec<Shape>) {
        match layer {
            Layer::Background => self.background = shapes,
            Layer::Planets => self.planets = shapes,
            Layer::Passes => self.passes = shapes,
            Layer::Satellites => {
                self.satellites = shapes;
                self.markers.clear();
            }
            Layer::Info => self.info = shapes,
        }
    }

    pub fn clear(&mut self, layer: Layer) {
        self.set_layer(layer, Vec::new());
    }
}

/// Topmost marker under the pointer.
pub fn marker_at(markers: &[MarkerHit], point: ScreenPoint) -> Option<&MarkerHit> {
    markers.iter().rev().find(|m| m.contains(point))
}
