use std::f64::consts::PI;

use super::geometry::ViewportGeometry;
use super::types::{HorizonFix, HorizonPoint, ScreenPoint};

/// Maps azimuth/elevation in degrees to pixels. North is up and azimuth grows
/// clockwise; elevation is linear from the rim (0°) to the centre (90°).
///
/// Below-horizon positions return [`ScreenPoint::ORIGIN`]; callers must check
/// the elevation before placing anything at the result.
pub fn az_el_to_screen(az: f64, el: f64, geometry: &ViewportGeometry) -> ScreenPoint {
    if el < 0.0 {
        return ScreenPoint::ORIGIN;
    }

    let az = az.to_radians();
    let el = el.to_radians();
    let radius = geometry.radius;
    let rel = radius - (2.0 * radius * el) / PI;

    ScreenPoint {
        x: geometry.center.x + rel * az.sin(),
        y: geometry.center.y - rel * az.cos(),
    }
}

/// Same mapping as [`az_el_to_screen`], with `None` in place of the sentinel.
pub fn project(az: f64, el: f64, geometry: &ViewportGeometry) -> Option<ScreenPoint> {
    (el >= 0.0).then(|| az_el_to_screen(az, el, geometry))
}

/// Inverse of [`az_el_to_screen`].
pub fn screen_to_az_el(point: ScreenPoint, geometry: &ViewportGeometry) -> HorizonFix {
    let radius = geometry.radius;
    if radius <= 0.0 {
        return HorizonFix {
            point: HorizonPoint {
                azimuth: 0.0,
                elevation: 0.0,
            },
            valid: false,
        };
    }

    let dx = point.x - geometry.center.x;
    let dy = geometry.center.y - point.y;
    let rel = radius - geometry.distance_from_center(point);
    let elevation = 90.0 * rel / radius;

    let bearing = dx.atan2(dy).to_degrees();
    let azimuth = if point.x >= geometry.center.x {
        bearing
    } else {
        360.0 + bearing
    };

    HorizonFix {
        point: HorizonPoint { azimuth, elevation },
        valid: azimuth >= 0.0 && elevation >= 0.0,
    }
}
