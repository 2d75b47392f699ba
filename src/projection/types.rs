use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A position on the sky as seen from the station, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HorizonPoint {
    pub azimuth: f64,
    pub elevation: f64,
}

/// Pixel coordinates, only meaningful for the geometry they were computed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const ORIGIN: ScreenPoint = ScreenPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn distance_to(self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Result of mapping a pixel back onto the horizon disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct HorizonFix {
    pub point: HorizonPoint,
    /// False when the pixel lies outside the plotted disc.
    pub valid: bool,
}
