use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

use crate::projection::DEFAULT_MARGIN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub icons: IconConfig,
    /// Tracking snapshot loaded at startup.
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_margin")]
    pub margin: u32,
    #[serde(
        default = "default_frame_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub frame_interval: Duration,
    #[serde(default)]
    pub show_planets: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            frame_interval: default_frame_interval(),
            show_planets: false,
        }
    }
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    600
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN
}

fn default_frame_interval() -> Duration {
    Duration::from_millis(16)
}

/// Application settings the view reads on every draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    /// Rise/set (AoS/LoS) elevation threshold in degrees.
    #[serde(default)]
    pub aos_elevation_deg: f64,
    #[serde(default = "default_true")]
    pub have_canvas: bool,
    #[serde(default)]
    pub debug_level: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aos_elevation_deg: 0.0,
            have_canvas: true,
            debug_level: 0,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

#[derive(Debug, Clone, Deserialize)]
pub struct IconConfig {
    #[serde(default = "default_icon_base")]
    pub base_url: String,
    #[serde(default = "default_icon_keys")]
    pub keys: Vec<String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            base_url: default_icon_base(),
            keys: default_icon_keys(),
        }
    }
}

fn default_icon_base() -> String {
    "/static/icons".to_string()
}

fn default_icon_keys() -> Vec<String> {
    let named = [
        "satellite16",
        "generic",
        "sun",
        "mercury",
        "venus",
        "mars",
        "jupiter",
        "saturn",
        "uranus",
        "neptune",
        "pluto",
    ];
    named
        .iter()
        .map(|k| k.to_string())
        .chain((0..8).map(|phase| format!("moon{}", phase)))
        .collect()
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
