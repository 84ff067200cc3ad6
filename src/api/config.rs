use serde::{Deserialize, Serialize};

use crate::core::{NonFinitePolicy, ProgressPolicy};
use crate::error::{TransitionError, TransitionResult};

/// Diff processor configuration.
///
/// Serializable so hosts can keep it next to the rest of their chart setup.
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffProcessorConfig {
    #[serde(default)]
    pub progress_policy: ProgressPolicy,
    #[serde(default)]
    pub non_finite_policy: NonFinitePolicy,
}

impl DiffProcessorConfig {
    #[must_use]
    pub fn with_progress_policy(mut self, policy: ProgressPolicy) -> Self {
        self.progress_policy = policy;
        self
    }

    #[must_use]
    pub fn with_non_finite_policy(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite_policy = policy;
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> TransitionResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| TransitionError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> TransitionResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TransitionError::InvalidData(format!("failed to parse config: {e}")))
    }
}
