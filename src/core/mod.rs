pub mod alignment;
pub mod canonical;
pub mod interpolation;
pub mod ranges;
pub mod types;

pub use alignment::{AlignmentEntry, AlignmentIndex, PointLifecycle};
pub use canonical::{NonFinitePolicy, canonicalize_generation, canonicalize_series, point_count};
pub use interpolation::{Progress, ProgressPolicy, interpolate, interpolate_range};
pub use ranges::{RangeTracker, stacked_y_range, y_range};
pub use types::{DataPoint, Generation, Series, ValueRange};
