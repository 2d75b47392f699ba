mod geometry;
mod projector;
mod types;

pub use geometry::{ViewportGeometry, DEFAULT_MARGIN};
pub use projector::{az_el_to_screen, project, screen_to_az_el};
pub use types::{HorizonFix, HorizonPoint, ScreenPoint};
