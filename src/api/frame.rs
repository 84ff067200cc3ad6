use serde::{Deserialize, Serialize};

use crate::core::{Generation, Progress, ValueRange};
use crate::error::{TransitionError, TransitionResult};

use super::TransitionState;

/// Everything a renderer needs for one animation frame.
///
/// Series and ranges always come from the same published state, so axis
/// bounds never belong to a different generation than the points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionFrame {
    pub progress: f64,
    pub series: Generation,
    pub y_range: ValueRange,
    pub stacked_y_range: ValueRange,
}

impl TransitionFrame {
    #[must_use]
    pub fn from_state(state: &TransitionState, progress: Progress) -> Self {
        Self {
            progress: progress.value(),
            series: state.progress_diff_at(progress),
            y_range: state.y_range_at(progress),
            stacked_y_range: state.stacked_y_range_at(progress),
        }
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }

    pub fn to_json_pretty(&self) -> TransitionResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TransitionError::InvalidData(format!("failed to serialize frame: {e}")))
    }

    pub fn from_json_str(input: &str) -> TransitionResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TransitionError::InvalidData(format!("failed to parse frame: {e}")))
    }
}
