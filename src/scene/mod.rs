mod background;
mod builder;
mod cursor;
mod icons;
mod types;

pub use builder::SceneBuilder;
pub use cursor::{CursorReadout, CursorText, CursorTracker};
pub use icons::{IconCache, IconDirectory};
pub use types::{marker_at, Fill, Font, Layer, MarkerHit, Scene, Shape, Stroke};
