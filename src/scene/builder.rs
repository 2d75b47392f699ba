use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::pass::{segment, SegmentedPass};
use crate::projection::{az_el_to_screen, project, ScreenPoint, ViewportGeometry};
use crate::tracking::{Planet, Satellite, TrackingData};

use super::background::background;
use super::icons::{IconCache, GENERIC_ICON, SATELLITE_ICON};
use super::types::{
    Fill, Font, MarkerHit, Scene, Shape, Stroke, GRID, LABEL, PASS_LABEL, PASS_MUTED,
    PASS_VISIBLE,
};

const SATELLITE_ICON_SIZE: f64 = 16.0;
const PLANET_ICON_SIZE: f64 = 32.0;

/// Builds scene descriptions for one geometry snapshot.
pub struct SceneBuilder<'a> {
    geometry: &'a ViewportGeometry,
    settings: &'a Settings,
    icons: &'a dyn IconCache,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(
        geometry: &'a ViewportGeometry,
        settings: &'a Settings,
        icons: &'a dyn IconCache,
    ) -> Self {
        Self {
            geometry,
            settings,
            icons,
        }
    }

    pub fn build(&self, data: &dyn TrackingData, show_planets: bool) -> Scene {
        let mut scene = Scene {
            width: self.geometry.width,
            height: self.geometry.height,
            background: background(self.geometry),
            planets: self.planets(data.planets(), show_planets),
            info: self.info(data.following()),
            ..Scene::default()
        };

        for satellite in data.satellites().iter().filter(|s| s.displaying) {
            if satellite.selected {
                scene.passes.extend(self.selected_pass(satellite));
            }
            self.satellite(satellite, &mut scene);
        }

        scene
    }

    pub fn planets(&self, planets: &[Planet], show: bool) -> Vec<Shape> {
        if !show {
            return Vec::new();
        }

        let mut shapes = Vec::new();
        for planet in planets.iter().filter(|p| p.altitude_deg > 0.0) {
            let pos = az_el_to_screen(planet.azimuth_deg, planet.altitude_deg, self.geometry);
            let half = PLANET_ICON_SIZE / 2.0;
            shapes.push(Shape::Image {
                at: pos.offset(-half, -half),
                size: PLANET_ICON_SIZE,
                image: self.icons.image(&planet.icon_key(), GENERIC_ICON),
            });
            shapes.push(Shape::text(
                pos.offset(0.0, -20.0),
                planet.name.clone(),
                Font::new(10.0, LABEL),
            ));
        }
        shapes
    }

    pub fn info(&self, following: Option<&Satellite>) -> Vec<Shape> {
        let Some(satellite) = following else {
            return Vec::new();
        };

        let bottom = f64::from(self.geometry.height);
        let mut shapes = vec![Shape::text(
            ScreenPoint::new(10.0, bottom - 50.0),
            format!("Information for {}", satellite.name),
            Font::new(10.0, GRID),
        )];

        match &satellite.next_event {
            Some(event) => {
                shapes.push(Shape::text(
                    ScreenPoint::new(10.0, bottom - 35.0),
                    format!("Next Event: {}", event.kind.long_name()),
                    Font::new(8.0, GRID),
                ));
                shapes.push(Shape::text(
                    ScreenPoint::new(10.0, bottom - 23.0),
                    format!("Event Time: {}", short_datetime(event.time)),
                    Font::new(8.0, GRID),
                ));
            }
            None => shapes.push(Shape::text(
                ScreenPoint::new(10.0, bottom - 35.0),
                "Next Event: N/A",
                Font::new(8.0, GRID),
            )),
        }
        shapes
    }

    fn satellite(&self, satellite: &Satellite, scene: &mut Scene) {
        if satellite.elevation_deg <= self.settings.aos_elevation_deg {
            return;
        }

        let Some(pos) = project(satellite.azimuth_deg, satellite.elevation_deg, self.geometry)
        else {
            return;
        };
        scene.satellites.push(Shape::text(
            pos.offset(-8.0, -20.0),
            satellite.name.clone(),
            Font::new(10.0, LABEL).bold(satellite.selected),
        ));

        let half = SATELLITE_ICON_SIZE / 2.0;
        let origin = pos.offset(-half, -half);
        scene.satellites.push(Shape::Image {
            at: origin,
            size: SATELLITE_ICON_SIZE,
            image: self.icons.image(SATELLITE_ICON, GENERIC_ICON),
        });
        scene.markers.push(MarkerHit {
            catalog_number: satellite.catalog_number,
            origin,
            size: SATELLITE_ICON_SIZE,
        });
    }

    fn selected_pass(&self, satellite: &Satellite) -> Vec<Shape> {
        let Some(prediction) = &satellite.next_pass else {
            return Vec::new();
        };

        let threshold = self.settings.aos_elevation_deg;
        let pass = segment(&prediction.samples, threshold, self.geometry);
        let mut shapes = Vec::new();

        if pass.has_risen() {
            trajectory(&pass, &mut shapes);
        }

        if let Some(max) = pass.max_elevation_point {
            if !pass.has_risen() || satellite.elevation_deg < threshold {
                shapes.push(Shape::text(
                    max.offset(5.0, 5.0),
                    satellite.name.clone(),
                    Font::new(6.0, PASS_LABEL),
                ));
            }
            let above_horizon = pass
                .max_elevation
                .as_ref()
                .is_some_and(|m| m.elevation_deg > 0.0);
            if pass.has_risen() && above_horizon {
                shapes.push(Shape::Circle {
                    center: max,
                    radius: 2.0,
                    stroke: Some(Stroke::new(PASS_MUTED, 1.0)),
                    fill: Some(Fill::solid(PASS_MUTED)),
                });
            }
        }

        let aos = prediction.aos.or(pass.rise_time);
        if let (Some(at), Some(time)) = (pass.rise_point(), aos) {
            shapes.push(pass_label(at, "AoS", time));
        }
        let los = prediction.los.or(pass.set_time);
        if let (Some(at), Some(time)) = (pass.set_point(), los) {
            shapes.push(pass_label(at, "LoS", time));
        }

        shapes
    }
}

fn trajectory(pass: &SegmentedPass, shapes: &mut Vec<Shape>) {
    let muted = Stroke::new(PASS_MUTED, 1.0);
    let pre = pass.pre_rise_line();
    if !pre.is_empty() {
        shapes.push(Shape::line(pre, muted.clone()));
    }
    shapes.push(Shape::line(
        pass.visible.clone(),
        Stroke::new(PASS_VISIBLE, 2.0),
    ));
    if !pass.post_set.is_empty() {
        shapes.push(Shape::line(pass.post_set.clone(), muted));
    }
}

fn pass_label(at: ScreenPoint, kind: &str, time: DateTime<Utc>) -> Shape {
    Shape::text(
        at,
        format!("{}: {}", kind, short_datetime(time)),
        Font::new(6.0, PASS_LABEL),
    )
}

pub fn short_datetime(time: DateTime<Utc>) -> String {
    time.format("%d/%m %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::PassSample;
    use crate::scene::{marker_at, IconDirectory};
    use crate::tracking::{EventKind, NextEvent, PassPrediction, Snapshot};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    fn prediction(points: &[(f64, f64)]) -> PassPrediction {
        let samples: Vec<_> = points
            .iter()
            .enumerate()
            .map(|(i, &(az, el))| PassSample {
                timestamp: start() + Duration::seconds(60 * i as i64),
                azimuth_deg: az,
                elevation_deg: el,
            })
            .collect();
        PassPrediction {
            aos: Some(start() + Duration::seconds(90)),
            los: Some(start() + Duration::seconds(200)),
            samples,
        }
    }

    fn satellite(catalog_number: u32, az: f64, el: f64) -> Satellite {
        Satellite {
            name: format!("SAT-{}", catalog_number),
            catalog_number,
            displaying: true,
            selected: false,
            azimuth_deg: az,
            elevation_deg: el,
            next_pass: None,
            next_event: None,
        }
    }

    fn icons() -> IconDirectory {
        IconDirectory::new("/icons", ["satellite16", "generic", "moon2", "mars"].map(String::from))
    }

    fn settings() -> Settings {
        Settings {
            aos_elevation_deg: 10.0,
            ..Settings::default()
        }
    }

    fn texts(shapes: &[Shape]) -> Vec<String> {
        shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn lines(shapes: &[Shape]) -> Vec<(&Vec<ScreenPoint>, &Stroke)> {
        shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Line { points, stroke } => Some((points, stroke)),
                _ => None,
            })
            .collect()
    }

    const TYPICAL: [(f64, f64); 5] = [(0.0, -5.0), (10.0, 5.0), (45.0, 20.0), (90.0, 5.0), (95.0, -5.0)];

    #[test]
    fn selected_pass_draws_three_segments_and_labels() {
        let g = ViewportGeometry::new(800, 800, 40);
        let settings = settings();
        let icons = icons();
        let mut sat = satellite(25544, 45.0, 20.0);
        sat.selected = true;
        sat.next_pass = Some(prediction(&TYPICAL));
        let snapshot = Snapshot {
            satellites: vec![sat],
            ..Snapshot::default()
        };

        let scene = SceneBuilder::new(&g, &settings, &icons).build(&snapshot, false);

        let drawn = lines(&scene.passes);
        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn[0].0.len(), 2);
        assert_eq!(drawn[0].1.color, PASS_MUTED);
        assert_eq!(drawn[1].0.len(), 1);
        assert_eq!(drawn[1].1.width, 2.0);
        assert_eq!(drawn[2].0.len(), 2);
        assert_eq!(drawn[2].0[0], drawn[1].0[0]);

        let labels = texts(&scene.passes);
        assert!(labels.contains(&"AoS: 14/03 12:01:30".to_string()));
        assert!(labels.contains(&"LoS: 14/03 12:03:20".to_string()));
        assert!(!labels.contains(&"SAT-25544".to_string()));
        assert!(scene
            .passes
            .iter()
            .any(|s| matches!(s, Shape::Circle { radius, .. } if *radius == 2.0)));

        let sat_labels: Vec<_> = scene
            .satellites
            .iter()
            .filter_map(|s| match s {
                Shape::Text { font, .. } => Some(font.bold),
                _ => None,
            })
            .collect();
        assert_eq!(sat_labels, vec![true]);
        assert_eq!(scene.markers.len(), 1);
    }

    #[test]
    fn selected_satellite_below_threshold_is_labelled_at_max() {
        let g = ViewportGeometry::new(800, 800, 40);
        let settings = settings();
        let icons = icons();
        let mut sat = satellite(25544, 200.0, -20.0);
        sat.selected = true;
        sat.next_pass = Some(prediction(&TYPICAL));
        let snapshot = Snapshot {
            satellites: vec![sat],
            ..Snapshot::default()
        };

        let scene = SceneBuilder::new(&g, &settings, &icons).build(&snapshot, false);
        let max = az_el_to_screen(45.0, 20.0, &g);

        assert!(scene.satellites.is_empty());
        assert!(scene.markers.is_empty());
        assert!(scene.passes.iter().any(|s| matches!(
            s,
            Shape::Text { at, text, .. } if *at == max.offset(5.0, 5.0) && text == "SAT-25544"
        )));
    }

    #[test]
    fn pass_that_never_rises_gets_only_a_label() {
        let g = ViewportGeometry::new(800, 800, 40);
        let settings = settings();
        let icons = icons();
        let mut sat = satellite(7, 0.0, -10.0);
        sat.selected = true;
        sat.next_pass = Some(prediction(&[(0.0, -1.0), (20.0, 4.0), (40.0, 8.0), (60.0, 3.0)]));
        let snapshot = Snapshot {
            satellites: vec![sat],
            ..Snapshot::default()
        };

        let scene = SceneBuilder::new(&g, &settings, &icons).build(&snapshot, false);
        assert_eq!(scene.passes.len(), 1);
        assert_eq!(texts(&scene.passes), vec!["SAT-7".to_string()]);
    }

    #[test]
    fn satellites_filtered_by_display_and_threshold() {
        let g = ViewportGeometry::new(800, 800, 40);
        let settings = settings();
        let icons = icons();
        let mut hidden = satellite(1, 90.0, 45.0);
        hidden.displaying = false;
        let low = satellite(2, 90.0, 10.0);
        let high = satellite(3, 180.0, 30.0);
        let snapshot = Snapshot {
            satellites: vec![hidden, low, high],
            ..Snapshot::default()
        };

        let scene = SceneBuilder::new(&g, &settings, &icons).build(&snapshot, false);
        assert_eq!(texts(&scene.satellites), vec!["SAT-3".to_string()]);
        assert!(scene.passes.is_empty());

        let pos = az_el_to_screen(180.0, 30.0, &g);
        assert_eq!(marker_at(&scene.markers, pos).map(|m| m.catalog_number), Some(3));
        assert!(marker_at(&scene.markers, pos.offset(20.0, 0.0)).is_none());
        assert!(scene.satellites.iter().any(|s| matches!(
            s,
            Shape::Image { image, .. } if image == "/icons/satellite16.png"
        )));
    }

    #[test]
    fn negative_threshold_never_places_satellites_below_horizon() {
        let g = ViewportGeometry::new(800, 800, 40);
        let settings = Settings {
            aos_elevation_deg: -10.0,
            ..Settings::default()
        };
        let icons = icons();
        let snapshot = Snapshot {
            satellites: vec![satellite(1, 90.0, -5.0), satellite(2, 90.0, 0.0)],
            ..Snapshot::default()
        };

        let scene = SceneBuilder::new(&g, &settings, &icons).build(&snapshot, false);
        assert_eq!(texts(&scene.satellites), vec!["SAT-2".to_string()]);
        assert_eq!(
            scene.markers.iter().map(|m| m.catalog_number).collect::<Vec<_>>(),
            vec![2]
        );
        assert!(marker_at(&scene.markers, ScreenPoint::ORIGIN).is_none());
    }

    #[test]
    fn planets_above_horizon_when_enabled() {
        let g = ViewportGeometry::new(800, 800, 40);
        let settings = settings();
        let icons = icons();
        let planets = vec![
            Planet {
                name: "Moon".into(),
                azimuth_deg: 100.0,
                altitude_deg: 30.0,
                phase: Some(2),
            },
            Planet {
                name: "Mars".into(),
                azimuth_deg: 200.0,
                altitude_deg: 5.0,
                phase: None,
            },
            Planet {
                name: "Venus".into(),
                azimuth_deg: 300.0,
                altitude_deg: -2.0,
                phase: None,
            },
        ];
        let builder = SceneBuilder::new(&g, &settings, &icons);

        assert!(builder.planets(&planets, false).is_empty());

        let shapes = builder.planets(&planets, true);
        let images: Vec<_> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Image { image, .. } => Some(image.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(images, vec!["/icons/moon2.png", "/icons/mars.png"]);
        assert_eq!(texts(&shapes), vec!["Moon".to_string(), "Mars".to_string()]);
    }

    #[test]
    fn info_panel_for_followed_satellite() {
        let g = ViewportGeometry::new(800, 600, 40);
        let settings = settings();
        let icons = icons();
        let mut sat = satellite(25544, 0.0, 0.0);
        sat.name = "ISS".into();
        sat.next_event = Some(NextEvent {
            kind: EventKind::Aos,
            time: start(),
        });
        let builder = SceneBuilder::new(&g, &settings, &icons);

        assert!(builder.info(None).is_empty());
        let shapes = builder.info(Some(&sat));
        assert_eq!(
            texts(&shapes),
            vec![
                "Information for ISS".to_string(),
                "Next Event: Acquisition of signal".to_string(),
                "Event Time: 14/03 12:00:00".to_string(),
            ]
        );
        assert!(matches!(&shapes[0], Shape::Text { at, .. } if at.y == 550.0));
    }
}
