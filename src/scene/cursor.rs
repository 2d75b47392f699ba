use serde::Serialize;
use utoipa::ToSchema;

use crate::projection::{screen_to_az_el, ScreenPoint, ViewportGeometry};

use super::types::{Font, Shape, GRID};

const NOT_AVAILABLE: &str = "N/A";
const AZIMUTH_FIELD: ScreenPoint = ScreenPoint { x: 100.0, y: 30.0 };
const ELEVATION_FIELD: ScreenPoint = ScreenPoint { x: 100.0, y: 50.0 };

/// Pointer position as seen on the sky.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct CursorReadout {
    pub azimuth: f64,
    pub elevation: f64,
    pub visible: bool,
}

impl CursorReadout {
    pub fn at(point: ScreenPoint, geometry: &ViewportGeometry) -> Self {
        let fix = screen_to_az_el(point, geometry);
        Self {
            azimuth: fix.point.azimuth,
            elevation: fix.point.elevation,
            visible: fix.valid,
        }
    }
}

/// The two readout values as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CursorText {
    pub azimuth: String,
    pub elevation: String,
}

impl CursorText {
    pub fn unavailable() -> Self {
        Self {
            azimuth: NOT_AVAILABLE.to_string(),
            elevation: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn from_readout(readout: &CursorReadout) -> Self {
        if !readout.visible {
            return Self::unavailable();
        }
        Self {
            azimuth: format!("{:.0}", readout.azimuth),
            elevation: format!("{:.0}", readout.elevation),
        }
    }

    pub fn shapes(&self) -> Vec<Shape> {
        vec![
            Shape::text(AZIMUTH_FIELD, self.azimuth.clone(), Font::new(12.0, GRID)),
            Shape::text(ELEVATION_FIELD, self.elevation.clone(), Font::new(12.0, GRID)),
        ]
    }
}

impl Default for CursorText {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Keeps the last pointer position and the text last handed to the renderer,
/// so an unchanged readout is not re-issued every frame.
#[derive(Debug, Default)]
pub struct CursorTracker {
    pointer: Option<ScreenPoint>,
    issued: Option<CursorText>,
}

impl CursorTracker {
    pub fn pointer_moved(&mut self, point: ScreenPoint) {
        self.pointer = Some(point);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    pub fn readout(&self, geometry: Option<&ViewportGeometry>) -> CursorReadout {
        match (self.pointer, geometry) {
            (Some(point), Some(geometry)) => CursorReadout::at(point, geometry),
            _ => CursorReadout::default(),
        }
    }

    /// Text to draw this frame, or `None` when it matches what was last issued.
    pub fn refresh(&mut self, geometry: Option<&ViewportGeometry>) -> Option<CursorText> {
        let text = CursorText::from_readout(&self.readout(geometry));
        if self.issued.as_ref() == Some(&text) {
            return None;
        }
        self.issued = Some(text.clone());
        Some(text)
    }

    /// Forces the next refresh to re-issue, e.g. after the surface was rebuilt.
    pub fn invalidate(&mut self) {
        self.issued = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ViewportGeometry {
        ViewportGeometry::new(600, 600, 40)
    }

    #[test]
    fn readout_is_issued_once_per_change() {
        let g = geometry();
        let mut cursor = CursorTracker::default();

        assert_eq!(cursor.refresh(Some(&g)), Some(CursorText::unavailable()));
        assert_eq!(cursor.refresh(Some(&g)), None);

        cursor.pointer_moved(g.center);
        let text = cursor.refresh(Some(&g)).unwrap();
        assert_eq!(text.elevation, "90");
        assert_eq!(cursor.refresh(Some(&g)), None);

        cursor.pointer_moved(g.center.offset(0.0, -0.5));
        assert_eq!(cursor.refresh(Some(&g)), None);

        cursor.pointer_left();
        assert_eq!(cursor.refresh(Some(&g)), Some(CursorText::unavailable()));
    }

    #[test]
    fn pointer_outside_disc_is_unavailable() {
        let g = geometry();
        let mut cursor = CursorTracker::default();
        cursor.pointer_moved(ScreenPoint::new(1.0, 1.0));
        assert!(!cursor.readout(Some(&g)).visible);
        assert_eq!(cursor.refresh(Some(&g)), Some(CursorText::unavailable()));
    }

    #[test]
    fn east_of_center_reads_ninety_azimuth() {
        let g = geometry();
        let mut cursor = CursorTracker::default();
        cursor.pointer_moved(g.center.offset(g.radius / 2.0, 0.0));
        let text = cursor.refresh(Some(&g)).unwrap();
        assert_eq!(text.azimuth, "90");
        assert_eq!(text.elevation, "45");
    }

    #[test]
    fn invalidate_reissues() {
        let g = geometry();
        let mut cursor = CursorTracker::default();
        cursor.refresh(Some(&g));
        cursor.invalidate();
        assert!(cursor.refresh(Some(&g)).is_some());
    }
}
