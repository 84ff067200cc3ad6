use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::ValueRange;
use crate::error::{TransitionError, TransitionResult};

/// How out-of-range progress input is handled.
///
/// NaN is rejected under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProgressPolicy {
    /// Finite values outside `[0, 1]` are clamped into it.
    #[default]
    Clamp,
    /// Values outside `[0, 1]` fail with `InvalidProgress`.
    Reject,
}

/// Validated animation progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    pub const START: Self = Self(0.0);
    pub const END: Self = Self(1.0);

    /// Accepts only values inside `[0, 1]`.
    pub fn new(value: f64) -> TransitionResult<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TransitionError::InvalidProgress { progress: value })
        }
    }

    /// Clamps finite values into `[0, 1]`.
    pub fn clamped(value: f64) -> TransitionResult<Self> {
        if value.is_nan() {
            return Err(TransitionError::InvalidProgress { progress: value });
        }
        let clamped = value.clamp(0.0, 1.0);
        if clamped != value {
            trace!(progress = value, clamped, "clamped transition progress");
        }
        Ok(Self(clamped))
    }

    pub fn resolve(value: f64, policy: ProgressPolicy) -> TransitionResult<Self> {
        match policy {
            ProgressPolicy::Clamp => Self::clamped(value),
            ProgressPolicy::Reject => Self::new(value),
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True only at exactly `1.0`, the point where removed samples vanish.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 == 1.0
    }
}

/// Linear interpolation with absent values treated as `0.0`.
///
/// This is the single primitive used for point values and range bounds.
/// Unchanged values stay constant for every progress, and `1.0` yields `new`
/// bit for bit.
#[must_use]
pub fn interpolate(old: Option<f64>, new: Option<f64>, progress: f64) -> f64 {
    let old = old.unwrap_or(0.0);
    let new = new.unwrap_or(0.0);
    if progress == 1.0 {
        return new;
    }
    old + (new - old) * progress
}

/// Interpolates both bounds independently.
#[must_use]
pub fn interpolate_range(old: ValueRange, new: ValueRange, progress: Progress) -> ValueRange {
    ValueRange {
        min: interpolate(Some(old.min), Some(new.min), progress.value()),
        max: interpolate(Some(old.max), Some(new.max), progress.value()),
    }
}
