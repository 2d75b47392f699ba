mod segmenter;
mod types;

pub use segmenter::segment;
pub use types::{PassSample, SegmentedPass};
