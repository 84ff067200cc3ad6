use crate::core::canonical::is_canonical;
use crate::core::{
    AlignmentIndex, Generation, NonFinitePolicy, Progress, RangeTracker, Series, ValueRange,
    canonicalize_generation, point_count,
};
use crate::error::TransitionResult;

/// One published version of the engine's data: both generations plus the
/// alignment and ranges derived from them.
///
/// Immutable once built; readers query it without holding any lock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionState {
    old: Generation,
    new: Generation,
    index: AlignmentIndex,
    ranges: RangeTracker,
}

impl TransitionState {
    /// Canonicalizes both generations and builds the state from them.
    pub fn new(old: Generation, new: Generation, policy: NonFinitePolicy) -> TransitionResult<Self> {
        let old = canonicalize_generation(old, policy)?;
        let new = canonicalize_generation(new, policy)?;
        Ok(Self::build(old, new))
    }

    #[must_use]
    pub(crate) fn build(old: Generation, new: Generation) -> Self {
        debug_assert!(old.iter().chain(new.iter()).all(|series| is_canonical(series)));
        let index = AlignmentIndex::build(&old, &new);
        let ranges = RangeTracker::compute(&old, &new);
        Self {
            old,
            new,
            index,
            ranges,
        }
    }

    #[must_use]
    pub fn old_entries(&self) -> &[Series] {
        &self.old
    }

    #[must_use]
    pub fn new_entries(&self) -> &[Series] {
        &self.new
    }

    #[must_use]
    pub fn alignment(&self) -> &AlignmentIndex {
        &self.index
    }

    #[must_use]
    pub fn ranges(&self) -> &RangeTracker {
        &self.ranges
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.index.slot_count()
    }

    #[must_use]
    pub fn old_point_count(&self) -> usize {
        point_count(&self.old)
    }

    #[must_use]
    pub fn new_point_count(&self) -> usize {
        point_count(&self.new)
    }

    #[must_use]
    pub fn progress_diff_at(&self, progress: Progress) -> Generation {
        self.index.progress_diff(progress)
    }

    #[must_use]
    pub fn y_range_at(&self, progress: Progress) -> ValueRange {
        self.ranges.y_range_at(progress)
    }

    #[must_use]
    pub fn stacked_y_range_at(&self, progress: Progress) -> ValueRange {
        self.ranges.stacked_y_range_at(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::TransitionState;
    use crate::core::{DataPoint, NonFinitePolicy, Progress, ValueRange};

    #[test]
    fn new_canonicalizes_both_generations() {
        let state = TransitionState::new(
            vec![vec![DataPoint::new(2.0, 1.0), DataPoint::new(1.0, f64::NAN)]],
            vec![vec![DataPoint::new(3.0, 5.0), DataPoint::new(0.0, 2.0), DataPoint::new(3.0, 6.0)]],
            NonFinitePolicy::Drop,
        )
        .expect("state");

        assert_eq!(state.old_entries(), &[vec![DataPoint::new(2.0, 1.0)]]);
        assert_eq!(
            state.new_entries(),
            &[vec![DataPoint::new(0.0, 2.0), DataPoint::new(3.0, 6.0)]]
        );
        assert_eq!(state.slot_count(), 1);
        assert_eq!(state.old_point_count(), 1);
        assert_eq!(state.new_point_count(), 2);
        assert_eq!(state.y_range_at(Progress::END), ValueRange::new(2.0, 6.0));
    }

    #[test]
    fn new_rejects_non_finite_samples_under_reject_policy() {
        let result = TransitionState::new(
            Vec::new(),
            vec![vec![DataPoint::new(f64::INFINITY, 1.0)]],
            NonFinitePolicy::Reject,
        );
        assert!(result.is_err());
    }
}
