use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

use super::error::SnapshotError;
use super::types::{Planet, Satellite, TrackingData};

/// Tracking state captured from a provider, loadable from YAML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Snapshot {
    #[serde(default)]
    pub satellites: Vec<Satellite>,
    #[serde(default)]
    pub planets: Vec<Planet>,
    /// Catalog number of the followed satellite.
    #[serde(default)]
    pub following: Option<u32>,
}

impl Snapshot {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let snapshot = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        Ok(snapshot)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_yaml::from_str(yaml)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        match self.following {
            Some(id) if self.satellite(id).is_none() => Err(SnapshotError::UnknownFollowing(id)),
            _ => Ok(()),
        }
    }

    pub fn satellite(&self, catalog_number: u32) -> Option<&Satellite> {
        self.satellites
            .iter()
            .find(|s| s.catalog_number == catalog_number)
    }

    pub fn set_following(&mut self, catalog_number: Option<u32>) -> Result<(), SnapshotError> {
        if let Some(id) = catalog_number {
            if self.satellite(id).is_none() {
                return Err(SnapshotError::UnknownFollowing(id));
            }
        }
        self.following = catalog_number;
        Ok(())
    }

    /// Marks one satellite as selected, clearing the flag on the others.
    pub fn select(&mut self, catalog_number: Option<u32>) -> bool {
        let mut found = false;
        for satellite in &mut self.satellites {
            satellite.selected = Some(satellite.catalog_number) == catalog_number;
            found |= satellite.selected;
        }
        found
    }
}

impl TrackingData for Snapshot {
    fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    fn following(&self) -> Option<&Satellite> {
        self.following.and_then(|id| self.satellite(id))
    }

    fn planets(&self) -> &[Planet] {
        &self.planets
    }
}
