//! chart-transition: data-transition engine for animated charts.
//!
//! The engine aligns two generations of multi-series data by `x` and produces
//! in-between series and axis ranges for any animation progress in `[0, 1]`.
//! Driving progress over time and drawing the result are left to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{DefaultDiffProcessor, DiffProcessor, DiffProcessorConfig, TransitionFrame};
pub use error::{TransitionError, TransitionResult};
