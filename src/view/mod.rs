mod controller;
mod events;
mod renderer;
mod scheduler;

pub use controller::{Collaborators, FixedContainer, LoopState, RenderLoop, ViewContext};
pub use events::{OutboundEvent, ViewEvent};
pub use renderer::SceneStore;
pub use scheduler::{FrameTicks, ManualScheduler, TokioFrameScheduler};
