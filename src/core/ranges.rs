use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::interpolation::{Progress, interpolate_range};
use crate::core::{Series, ValueRange};

/// Min/max `y` across every series of a generation.
#[must_use]
pub fn y_range(generation: &[Series]) -> ValueRange {
    ValueRange::from_values(generation.iter().flatten().map(|point| point.y))
}

/// Min/max of the per-`x` sums across series, i.e. the bounds of a stacked
/// rendering of the generation.
///
/// Sums that overflow saturate at `f64::MAX` / `f64::MIN`.
#[must_use]
pub fn stacked_y_range(generation: &[Series]) -> ValueRange {
    let mut sums: IndexMap<OrderedFloat<f64>, f64> = IndexMap::new();
    let mut saturated_count = 0_usize;
    for point in generation.iter().flatten() {
        let sum = sums.entry(OrderedFloat(point.x)).or_insert(0.0);
        let next = *sum + point.y;
        if next.is_infinite() {
            saturated_count += 1;
        }
        *sum = next.clamp(f64::MIN, f64::MAX);
    }
    if saturated_count > 0 {
        warn!(saturated_count, "stacked sums overflowed and were saturated");
    }
    ValueRange::from_values(sums.into_values())
}

/// Plain and stacked ranges of both generations of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeTracker {
    pub old_y: ValueRange,
    pub new_y: ValueRange,
    pub old_stacked_y: ValueRange,
    pub new_stacked_y: ValueRange,
}

impl RangeTracker {
    #[must_use]
    pub fn compute(old: &[Series], new: &[Series]) -> Self {
        Self {
            old_y: y_range(old),
            new_y: y_range(new),
            old_stacked_y: stacked_y_range(old),
            new_stacked_y: stacked_y_range(new),
        }
    }

    /// Axis range at `progress`.
    ///
    /// Without previous data the new range applies immediately. When data is
    /// cleared the old range holds until completion, then snaps to empty.
    #[must_use]
    pub fn y_range_at(&self, progress: Progress) -> ValueRange {
        if self.old_y.is_empty() {
            self.new_y
        } else if self.new_y.is_empty() {
            if progress.is_complete() {
                self.new_y
            } else {
                self.old_y
            }
        } else {
            interpolate_range(self.old_y, self.new_y, progress)
        }
    }

    /// Stacked axis range at `progress`. Always interpolated, empty ranges
    /// included.
    #[must_use]
    pub fn stacked_y_range_at(&self, progress: Progress) -> ValueRange {
        interpolate_range(self.old_stacked_y, self.new_stacked_y, progress)
    }
}
