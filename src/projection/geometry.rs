use serde::Serialize;
use utoipa::ToSchema;

use super::types::ScreenPoint;

pub const DEFAULT_MARGIN: u32 = 40;

/// Size of the drawing surface and the horizon disc derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ViewportGeometry {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub center: ScreenPoint,
    pub radius: f64,
    pub half_margin: f64,
}

impl ViewportGeometry {
    pub fn new(width: u32, height: u32, margin: u32) -> Self {
        let size = f64::from(width.min(height)) - 2.0 * f64::from(margin);
        Self {
            width,
            height,
            margin,
            center: ScreenPoint::new(f64::from(width) / 2.0, f64::from(height) / 2.0),
            radius: (size / 2.0).max(0.0),
            half_margin: f64::from(margin) / 2.0,
        }
    }

    /// A viewport with no area or no room for the disc draws nothing.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0 && self.radius > 0.0
    }

    pub fn distance_from_center(&self, point: ScreenPoint) -> f64 {
        self.center.distance_to(point)
    }
}
