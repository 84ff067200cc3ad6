mod config;
mod frame;
mod processor;
mod state;

pub use config::DiffProcessorConfig;
pub use frame::TransitionFrame;
pub use processor::{DefaultDiffProcessor, DiffProcessor};
pub use state::TransitionState;
