mod segment;
mod types;

pub use segment::segment_multiplier;
pub use types::{Attribute, AttributeCatalog, Level, OptionSelection, SegmentConfig};
