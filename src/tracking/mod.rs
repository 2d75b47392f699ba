mod error;
mod snapshot;
mod types;

pub use error::SnapshotError;
pub use snapshot::Snapshot;
pub use types::{EventKind, NextEvent, PassPrediction, Planet, Satellite, TrackingData};
