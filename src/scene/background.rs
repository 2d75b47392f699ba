use crate::projection::{az_el_to_screen, ScreenPoint, ViewportGeometry};

use super::types::{
    Fill, Font, Shape, Stroke, BACKGROUND, GRID, GRID_LABEL, HORIZON_TOP, LABEL, RIM,
};

const RING_STEP_DEG: usize = 15;
const TICK_STEP_DEG: usize = 5;
const TICK_LONG: f64 = 15.0;
const TICK_SHORT: f64 = 10.0;

/// Static part of the horizon diagram: disc, rings, ticks, axes and captions.
pub fn background(geometry: &ViewportGeometry) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let center = geometry.center;
    let radius = geometry.radius;

    shapes.push(Shape::Rect {
        origin: ScreenPoint::ORIGIN,
        width: f64::from(geometry.width),
        height: f64::from(geometry.height),
        fill: Fill::solid(BACKGROUND),
    });
    shapes.push(Shape::Circle {
        center,
        radius: radius + geometry.half_margin,
        stroke: Some(Stroke::new(RIM, 10.0)),
        fill: Some(Fill::solid(BACKGROUND)),
    });
    shapes.push(Shape::Circle {
        center,
        radius,
        stroke: None,
        fill: Some(Fill::Gradient {
            top: HORIZON_TOP.to_string(),
            bottom: BACKGROUND.to_string(),
        }),
    });

    elevation_rings(geometry, &mut shapes);
    azimuth_ticks(geometry, &mut shapes);
    axes(geometry, &mut shapes);
    cardinal_labels(geometry, &mut shapes);
    readout_captions(&mut shapes);

    shapes
}

// Ring i sits where elevation 90 - i projects, so its label is the elevation.
fn elevation_rings(geometry: &ViewportGeometry, shapes: &mut Vec<Shape>) {
    let center = geometry.center;
    for step in (RING_STEP_DEG..90).step_by(RING_STEP_DEG) {
        let ring = geometry.radius * step as f64 / 90.0;
        shapes.push(Shape::Circle {
            center,
            radius: ring,
            stroke: Some(Stroke::new(GRID, 1.0)),
            fill: None,
        });

        let label = format!("{}°", 90 - step);
        let font = Font::new(10.0, GRID_LABEL);
        shapes.push(Shape::text(
            center.offset(-ring - 7.0, 5.0),
            label.clone(),
            font.clone(),
        ));
        shapes.push(Shape::text(center.offset(ring - 7.0, 5.0), label, font));
    }
}

fn azimuth_ticks(geometry: &ViewportGeometry, shapes: &mut Vec<Shape>) {
    let center = geometry.center;
    let outer = geometry.radius + TICK_LONG;
    for (i, deg) in (0..360).step_by(TICK_STEP_DEG).enumerate() {
        let len = if i % 2 == 0 { TICK_LONG } else { TICK_SHORT };
        let (sin, cos) = (deg as f64).to_radians().sin_cos();
        let inner = outer - len;
        shapes.push(Shape::line(
            vec![
                center.offset(inner * cos, inner * sin),
                center.offset(outer * cos, outer * sin),
            ],
            Stroke::new(GRID, 1.0),
        ));
    }
}

fn axes(geometry: &ViewportGeometry, shapes: &mut Vec<Shape>) {
    let center = geometry.center;
    let reach = geometry.radius + geometry.half_margin - 5.0;
    shapes.push(Shape::line(
        vec![center.offset(-reach, 0.0), center.offset(reach, 0.0)],
        Stroke::new(GRID, 1.0),
    ));
    shapes.push(Shape::line(
        vec![center.offset(0.0, -reach), center.offset(0.0, reach)],
        Stroke::new(GRID, 1.0),
    ));
}

fn cardinal_labels(geometry: &ViewportGeometry, shapes: &mut Vec<Shape>) {
    let half = geometry.half_margin;
    let cardinals = [
        ("N", 0.0, (5.0, -10.0 - half)),
        ("E", 90.0, (5.0, -half)),
        ("S", 180.0, (8.0, 5.0)),
        ("W", 270.0, (-15.0, -half)),
    ];
    for (name, az, (dx, dy)) in cardinals {
        let rim = az_el_to_screen(az, 0.0, geometry);
        shapes.push(Shape::text(rim.offset(dx, dy), name, Font::new(15.0, LABEL)));
    }
}

fn readout_captions(shapes: &mut Vec<Shape>) {
    shapes.push(Shape::text(
        ScreenPoint::new(0.0, 5.0),
        "Mouse Position",
        Font::new(15.0, LABEL),
    ));
    shapes.push(Shape::text(
        ScreenPoint::new(0.0, 30.0),
        "Azimuth:",
        Font::new(12.0, LABEL),
    ));
    shapes.push(Shape::text(
        ScreenPoint::new(0.0, 50.0),
        "Elevation:",
        Font::new(12.0, LABEL),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(shapes: &[Shape]) -> Vec<&str> {
        shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn ring_labels_show_elevation() {
        let shapes = background(&ViewportGeometry::new(600, 600, 40));
        let labels = texts(&shapes);
        for label in ["75°", "60°", "45°", "30°", "15°"] {
            assert_eq!(labels.iter().filter(|t| **t == label).count(), 2);
        }
        for cardinal in ["N", "E", "S", "W"] {
            assert!(labels.contains(&cardinal));
        }
    }

    #[test]
    fn ring_radius_matches_projection() {
        let g = ViewportGeometry::new(600, 600, 40);
        let shapes = background(&g);
        let rings: Vec<f64> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Circle { radius, fill: None, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        let at_sixty = az_el_to_screen(0.0, 60.0, &g);
        let expected = g.distance_from_center(at_sixty);
        assert!(rings.iter().any(|r| (r - expected).abs() < 1e-9));
    }

    #[test]
    fn ticks_alternate_long_and_short() {
        let g = ViewportGeometry::new(600, 600, 40);
        let lengths: Vec<f64> = background(&g)
            .iter()
            .filter_map(|s| match s {
                Shape::Line { points, .. } if points.len() == 2 => {
                    Some(points[0].distance_to(points[1]))
                }
                _ => None,
            })
            .take(72)
            .collect();
        assert_eq!(lengths.len(), 72);
        assert!((lengths[0] - TICK_LONG).abs() < 1e-9);
        assert!((lengths[1] - TICK_SHORT).abs() < 1e-9);
        assert!((lengths[2] - TICK_LONG).abs() < 1e-9);
    }
}
