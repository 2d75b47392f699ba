use std::collections::HashSet;

use crate::config::IconConfig;

pub const SATELLITE_ICON: &str = "satellite16";
pub const GENERIC_ICON: &str = "generic";

/// Resolves semantic icon keys to drawable image handles.
pub trait IconCache {
    fn image(&self, key: &str, fallback: &str) -> String;
}

/// Icons served as `<base_url>/<key>.png`; unknown keys resolve to the fallback.
#[derive(Debug, Clone)]
pub struct IconDirectory {
    base_url: String,
    known: HashSet<String>,
}

impl IconDirectory {
    pub fn new(base_url: impl Into<String>, keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            known: keys.into_iter().collect(),
        }
    }

    pub fn from_config(config: &IconConfig) -> Self {
        Self::new(config.base_url.clone(), config.keys.iter().cloned())
    }

    fn url(&self, key: &str) -> String {
        format!("{}/{}.png", self.base_url, key)
    }
}

impl IconCache for IconDirectory {
    fn image(&self, key: &str, fallback: &str) -> String {
        if self.known.contains(key) {
            self.url(key)
        } else {
            log::debug!("No icon for {}, using {}", key, fallback);
            self.url(fallback)
        }
    }
}
