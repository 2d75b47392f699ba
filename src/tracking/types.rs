use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::pass::PassSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[strum(to_string = "AoS")]
    Aos,
    #[strum(to_string = "LoS")]
    Los,
}

impl EventKind {
    pub fn long_name(&self) -> &'static str {
        match self {
            EventKind::Aos => "Acquisition of signal",
            EventKind::Los => "Loss of signal",
        }
    }
}

/// The next AoS or LoS of a followed satellite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NextEvent {
    pub kind: EventKind,
    pub time: DateTime<Utc>,
}

/// Predicted pass samples with the provider's AoS/LoS summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PassPrediction {
    #[serde(default)]
    pub aos: Option<DateTime<Utc>>,
    #[serde(default)]
    pub los: Option<DateTime<Utc>>,
    #[serde(default)]
    pub samples: Vec<PassSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Satellite {
    pub name: String,
    pub catalog_number: u32,
    #[serde(default = "default_true")]
    pub displaying: bool,
    #[serde(default)]
    pub selected: bool,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    #[serde(default)]
    pub next_pass: Option<PassPrediction>,
    #[serde(default)]
    pub next_event: Option<NextEvent>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Planet {
    pub name: String,
    pub azimuth_deg: f64,
    pub altitude_deg: f64,
    /// Moon phase index used to pick the icon.
    #[serde(default)]
    pub phase: Option<u8>,
}

impl Planet {
    pub fn is_moon(&self) -> bool {
        self.name.eq_ignore_ascii_case("moon")
    }

    pub fn icon_key(&self) -> String {
        let name = self.name.to_lowercase();
        match self.phase {
            Some(phase) if self.is_moon() => format!("{}{}", name, phase),
            _ => name,
        }
    }
}

/// Read-only view of the live tracking state.
pub trait TrackingData {
    fn satellites(&self) -> &[Satellite];
    fn following(&self) -> Option<&Satellite>;
    fn planets(&self) -> &[Planet];
}
