use crate::projection::{project, ViewportGeometry};

use super::types::{PassSample, SegmentedPass};

/// Splits a chronologically ordered pass into the approach, the arc above
/// `threshold_el` and the departure, projecting every above-horizon sample.
///
/// The scan stops at the first below-horizon sample after the satellite has
/// risen; anything later belongs to another pass.
pub fn segment(
    samples: &[PassSample],
    threshold_el: f64,
    geometry: &ViewportGeometry,
) -> SegmentedPass {
    let mut segmented = SegmentedPass::default();
    let mut has_risen = false;

    for sample in samples {
        let el = sample.elevation_deg;
        let position = project(sample.azimuth_deg, el, geometry);

        match position {
            Some(point) if el >= threshold_el => {
                if !has_risen {
                    segmented.rise_time = Some(sample.timestamp);
                    has_risen = true;
                }
                segmented.visible.push(point);
                segmented.set_time = Some(sample.timestamp);
            }
            Some(point) if !has_risen => segmented.pre_rise.push(point),
            Some(point) => {
                if segmented.post_set.is_empty() {
                    segmented.post_set.extend(segmented.visible.last().copied());
                }
                segmented.post_set.push(point);
            }
            None => {}
        }

        let higher = segmented
            .max_elevation
            .as_ref()
            .map_or(true, |max| el > max.elevation_deg);
        if higher {
            segmented.max_elevation = Some(sample.clone());
            segmented.max_elevation_point = position;
        }

        if has_risen && el < 0.0 {
            break;
        }
    }

    segmented
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::az_el_to_screen;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    fn pass(points: &[(f64, f64)]) -> Vec<PassSample> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(az, el))| PassSample {
                timestamp: start() + Duration::seconds(60 * i as i64),
                azimuth_deg: az,
                elevation_deg: el,
            })
            .collect()
    }

    fn geometry() -> ViewportGeometry {
        ViewportGeometry::new(800, 800, 40)
    }

    #[test]
    fn typical_pass_splits_into_three_segments() {
        let g = geometry();
        let samples = pass(&[(0.0, -5.0), (10.0, 5.0), (45.0, 20.0), (90.0, 5.0), (95.0, -5.0)]);
        let segmented = segment(&samples, 10.0, &g);

        let low_in = az_el_to_screen(10.0, 5.0, &g);
        let top = az_el_to_screen(45.0, 20.0, &g);
        let low_out = az_el_to_screen(90.0, 5.0, &g);

        assert_eq!(segmented.pre_rise, vec![low_in]);
        assert_eq!(segmented.visible, vec![top]);
        assert_eq!(segmented.post_set, vec![top, low_out]);
        assert_eq!(segmented.max_elevation.as_ref(), Some(&samples[2]));
        assert_eq!(segmented.max_elevation_point, Some(top));
        assert_eq!(segmented.rise_time, Some(samples[2].timestamp));
        assert_eq!(segmented.set_time, Some(samples[2].timestamp));
        assert_eq!(segmented.pre_rise_line(), vec![low_in, top]);
    }

    #[test]
    fn threshold_and_horizon_samples_are_inclusive() {
        let g = geometry();
        let samples = pass(&[(0.0, 0.0), (10.0, 10.0), (20.0, 30.0), (30.0, 10.0), (40.0, 0.0)]);
        let segmented = segment(&samples, 10.0, &g);

        let at = |i: usize| az_el_to_screen(samples[i].azimuth_deg, samples[i].elevation_deg, &g);
        assert_eq!(segmented.pre_rise, vec![at(0)]);
        assert_eq!(segmented.visible, vec![at(1), at(2), at(3)]);
        assert_eq!(segmented.post_set, vec![at(3), at(4)]);
        assert_eq!(segmented.rise_time, Some(samples[1].timestamp));
        assert_eq!(segmented.set_time, Some(samples[3].timestamp));
    }

    #[test]
    fn pass_entirely_above_threshold() {
        let g = geometry();
        let samples = pass(&[(100.0, 15.0), (120.0, 40.0), (140.0, 12.0)]);
        let segmented = segment(&samples, 10.0, &g);

        let expected: Vec<_> = samples
            .iter()
            .map(|s| az_el_to_screen(s.azimuth_deg, s.elevation_deg, &g))
            .collect();
        assert!(segmented.pre_rise.is_empty());
        assert!(segmented.post_set.is_empty());
        assert!(segmented.pre_rise_line().is_empty());
        assert_eq!(segmented.visible, expected);
        assert_eq!(segmented.rise_time, Some(samples[0].timestamp));
        assert_eq!(segmented.set_time, Some(samples[2].timestamp));
    }

    #[test]
    fn pass_entirely_below_horizon() {
        let samples = pass(&[(0.0, -30.0), (10.0, -12.0), (20.0, -20.0)]);
        let segmented = segment(&samples, 10.0, &geometry());

        assert!(segmented.pre_rise.is_empty());
        assert!(segmented.visible.is_empty());
        assert!(segmented.post_set.is_empty());
        assert_eq!(segmented.rise_time, None);
        assert_eq!(segmented.set_time, None);
        assert_eq!(segmented.max_elevation.map(|m| m.elevation_deg), Some(-12.0));
        assert_eq!(segmented.max_elevation_point, None);
    }

    #[test]
    fn pass_that_never_reaches_threshold() {
        let samples = pass(&[(0.0, -1.0), (20.0, 3.0), (40.0, 6.0), (60.0, 2.0), (80.0, -1.0)]);
        let segmented = segment(&samples, 10.0, &geometry());

        assert!(!segmented.has_risen());
        assert_eq!(segmented.pre_rise.len(), 3);
        assert!(segmented.post_set.is_empty());
        assert_eq!(segmented.rise_time, None);
        assert_eq!(segmented.max_elevation.map(|m| m.elevation_deg), Some(6.0));
        assert!(segmented.max_elevation_point.is_some());
    }

    #[test]
    fn max_elevation_tie_keeps_first() {
        let samples = pass(&[(10.0, 30.0), (20.0, 30.0)]);
        let segmented = segment(&samples, 10.0, &geometry());
        assert_eq!(segmented.max_elevation.as_ref(), Some(&samples[0]));
    }

    #[test]
    fn scan_stops_after_set() {
        let samples = pass(&[(10.0, 20.0), (20.0, -1.0), (30.0, 50.0)]);
        let segmented = segment(&samples, 10.0, &geometry());
        assert_eq!(segmented.visible.len(), 1);
        assert_eq!(segmented.max_elevation.map(|m| m.elevation_deg), Some(20.0));
    }

    #[test]
    fn empty_pass() {
        let segmented = segment(&[], 10.0, &geometry());
        assert_eq!(segmented, SegmentedPass::default());
    }
}
