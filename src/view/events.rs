use serde::Serialize;
use std::sync::{Arc, Mutex};
use strum_macros::Display;
use tokio::sync::broadcast;
use utoipa::ToSchema;

/// Notifications from the tracking side that affect what is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ViewEvent {
    DataUpdated,
    PassSetReloaded,
    FollowingChanged,
    ShowPlanets(bool),
}

/// Notifications the view sends back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutboundEvent {
    SatelliteClicked { catalog_number: u32 },
}

pub trait EventSink {
    fn publish(&self, event: OutboundEvent);
}

impl EventSink for broadcast::Sender<OutboundEvent> {
    fn publish(&self, event: OutboundEvent) {
        // No subscribers is not an error for a click.
        let _ = self.send(event);
    }
}

/// Keeps every published event, for callers that poll instead of subscribing.
impl EventSink for Arc<Mutex<Vec<OutboundEvent>>> {
    fn publish(&self, event: OutboundEvent) {
        if let Ok(mut events) = self.lock() {
            events.push(event);
        }
    }
}
