use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{DataPoint, Generation, Series};
use crate::error::{TransitionError, TransitionResult};

/// How samples with a NaN or infinite coordinate are handled on ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NonFinitePolicy {
    /// Drop the sample and keep the rest of the series.
    #[default]
    Drop,
    /// Fail the whole write.
    Reject,
}

/// Sorts a series by `x` and collapses duplicate keys, last write wins.
///
/// Non-finite samples are handled according to `policy`.
pub fn canonicalize_series(mut series: Series, policy: NonFinitePolicy) -> TransitionResult<Series> {
    let original_len = series.len();
    if policy == NonFinitePolicy::Reject {
        if let Some(point) = series.iter().find(|point| !point.is_finite()) {
            return Err(TransitionError::InvalidData(format!(
                "series sample ({}, {}) must be finite",
                point.x, point.y
            )));
        }
    }
    series.retain(|point| point.is_finite());
    // Stable sort keeps input order among equal keys so the last one wins below.
    series.sort_by_key(|point| OrderedFloat(point.x));

    let mut deduped: Series = Vec::with_capacity(series.len());
    let mut duplicate_count = 0_usize;
    for point in series {
        if let Some(last) = deduped.last_mut() {
            if OrderedFloat(point.x) == OrderedFloat(last.x) {
                *last = point;
                duplicate_count += 1;
                continue;
            }
        }
        deduped.push(point);
    }

    let filtered_count = original_len.saturating_sub(deduped.len() + duplicate_count);
    if filtered_count > 0 || duplicate_count > 0 {
        warn!(
            filtered_count,
            duplicate_count,
            canonical_count = deduped.len(),
            "canonicalized series on ingest"
        );
    }
    Ok(deduped)
}

/// Canonicalizes every slot, keeping slot positions even for series that end
/// up empty.
pub fn canonicalize_generation(
    generation: Generation,
    policy: NonFinitePolicy,
) -> TransitionResult<Generation> {
    generation
        .into_iter()
        .map(|series| canonicalize_series(series, policy))
        .collect()
}

/// Total sample count across all slots.
#[must_use]
pub fn point_count(generation: &[Series]) -> usize {
    generation.iter().map(Vec::len).sum()
}

#[must_use]
pub(crate) fn is_canonical(series: &[DataPoint]) -> bool {
    series.iter().all(|point| point.is_finite())
        && series
            .windows(2)
            .all(|pair| OrderedFloat(pair[0].x) < OrderedFloat(pair[1].x))
}
