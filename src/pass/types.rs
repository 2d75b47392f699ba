use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::projection::ScreenPoint;

/// One predicted instant of a satellite pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PassSample {
    pub timestamp: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

/// A pass split around the rise/set threshold, in screen space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SegmentedPass {
    /// Approach samples between the horizon and the threshold.
    pub pre_rise: Vec<ScreenPoint>,
    pub visible: Vec<ScreenPoint>,
    /// Starts with the last visible point so the departure line is continuous.
    pub post_set: Vec<ScreenPoint>,
    pub rise_time: Option<DateTime<Utc>>,
    pub set_time: Option<DateTime<Utc>>,
    pub max_elevation: Option<PassSample>,
    /// `None` when the highest sample is still below the horizon.
    pub max_elevation_point: Option<ScreenPoint>,
}

impl SegmentedPass {
    pub fn has_risen(&self) -> bool {
        !self.visible.is_empty()
    }

    pub fn rise_point(&self) -> Option<ScreenPoint> {
        self.visible.first().copied()
    }

    /// First point of the departure line, i.e. where the LoS label goes.
    pub fn set_point(&self) -> Option<ScreenPoint> {
        self.post_set.first().copied()
    }

    /// Approach polyline, joined to the rise point when there is one.
    pub fn pre_rise_line(&self) -> Vec<ScreenPoint> {
        if self.pre_rise.is_empty() {
            return Vec::new();
        }
        let mut line = self.pre_rise.clone();
        line.extend(self.rise_point());
        line
    }
}
