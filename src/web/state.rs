use std::sync::Arc;
use tokio::sync::Mutex;

use crate::tracking::Snapshot;
use crate::view::{RenderLoop, SceneStore, TokioFrameScheduler};

pub type PolarLoop = RenderLoop<TokioFrameScheduler, SceneStore, Snapshot>;

#[derive(Clone)]
pub struct AppState {
    pub view: Arc<Mutex<PolarLoop>>,
}
