use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-rebuild")]
use rayon::prelude::*;

use crate::core::interpolation::{Progress, interpolate};
use crate::core::{DataPoint, Generation, Series};

/// Lifecycle of one aligned key across a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointLifecycle {
    /// Present only in the old generation: animates toward zero and is
    /// dropped once progress reaches `1.0`.
    Transient,
    /// Present in the new generation, with or without an old counterpart.
    Persistent,
}

/// Old/new values aligned under one `x` key of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentEntry {
    pub old_y: Option<f64>,
    pub new_y: Option<f64>,
    pub lifecycle: PointLifecycle,
}

impl AlignmentEntry {
    #[must_use]
    pub fn from_old(y: f64) -> Self {
        Self {
            old_y: Some(y),
            new_y: None,
            lifecycle: PointLifecycle::Transient,
        }
    }

    /// Entry for a key seen in the new pass, keeping any old value already
    /// recorded under the same key.
    #[must_use]
    pub fn from_new(previous: Option<&Self>, y: f64) -> Self {
        Self {
            old_y: previous.and_then(|entry| entry.old_y),
            new_y: Some(y),
            lifecycle: PointLifecycle::Persistent,
        }
    }

    #[must_use]
    pub fn is_transient(self) -> bool {
        self.lifecycle == PointLifecycle::Transient
    }

    #[must_use]
    pub fn is_visible_at(self, progress: Progress) -> bool {
        !(self.is_transient() && progress.is_complete())
    }

    #[must_use]
    pub fn value_at(self, progress: Progress) -> f64 {
        interpolate(self.old_y, self.new_y, progress.value())
    }
}

/// Per-slot alignment keyed by `x`, iterated in ascending order.
type SlotAlignment = BTreeMap<OrderedFloat<f64>, AlignmentEntry>;

/// Alignment of two generations, one ordered map per slot.
///
/// Always built from scratch; there is no incremental update path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentIndex {
    slots: Vec<SlotAlignment>,
}

impl AlignmentIndex {
    /// Aligns `old` and `new` slot by slot.
    ///
    /// The slot count is the larger of the two generation lengths.
    #[must_use]
    pub fn build(old: &[Series], new: &[Series]) -> Self {
        let slot_count = old.len().max(new.len());

        #[cfg(feature = "parallel-rebuild")]
        let slots = (0..slot_count)
            .into_par_iter()
            .map(|slot| build_slot(old.get(slot), new.get(slot)))
            .collect();

        #[cfg(not(feature = "parallel-rebuild"))]
        let slots = (0..slot_count)
            .map(|slot| build_slot(old.get(slot), new.get(slot)))
            .collect();

        Self { slots }
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Looks up the entry recorded for `x` in `slot`.
    #[must_use]
    pub fn entry(&self, slot: usize, x: f64) -> Option<AlignmentEntry> {
        self.slots.get(slot)?.get(&OrderedFloat(x)).copied()
    }

    /// Entries of one slot in ascending `x` order.
    pub fn entries(&self, slot: usize) -> impl Iterator<Item = (f64, AlignmentEntry)> + '_ {
        self.slots
            .get(slot)
            .into_iter()
            .flat_map(|map| map.iter().map(|(x, entry)| (x.into_inner(), *entry)))
    }

    /// Interpolated generation at `progress`.
    ///
    /// Transient entries are dropped only at completion, and slots that end
    /// up without points are omitted from the output.
    #[must_use]
    pub fn progress_diff(&self, progress: Progress) -> Generation {
        self.slots
            .iter()
            .filter_map(|map| {
                let series: Series = map
                    .iter()
                    .filter(|(_, entry)| entry.is_visible_at(progress))
                    .map(|(x, entry)| DataPoint::new(x.into_inner(), entry.value_at(progress)))
                    .collect();
                (!series.is_empty()).then_some(series)
            })
            .collect()
    }
}

fn build_slot(old: Option<&Series>, new: Option<&Series>) -> SlotAlignment {
    let mut map = SlotAlignment::new();
    for point in old.into_iter().flatten() {
        map.insert(OrderedFloat(point.x), AlignmentEntry::from_old(point.y));
    }
    for point in new.into_iter().flatten() {
        let key = OrderedFloat(point.x);
        let entry = AlignmentEntry::from_new(map.get(&key), point.y);
        map.insert(key, entry);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::{AlignmentEntry, AlignmentIndex, PointLifecycle};
    use crate::core::interpolation::Progress;
    use crate::core::{DataPoint, Generation};

    fn generation(slots: &[&[(f64, f64)]]) -> Generation {
        slots
            .iter()
            .map(|points| points.iter().map(|&(x, y)| DataPoint::new(x, y)).collect())
            .collect()
    }

    #[test]
    fn builds_entries_for_kept_removed_and_added_keys() {
        let old = generation(&[&[(0.0, 1.0), (1.0, 2.0)]]);
        let new = generation(&[&[(0.0, 1.0), (2.0, 3.0)]]);
        let index = AlignmentIndex::build(&old, &new);

        assert_eq!(index.slot_count(), 1);
        assert_eq!(
            index.entry(0, 0.0),
            Some(AlignmentEntry {
                old_y: Some(1.0),
                new_y: Some(1.0),
                lifecycle: PointLifecycle::Persistent,
            })
        );
        assert_eq!(index.entry(0, 1.0), Some(AlignmentEntry::from_old(2.0)));
        assert_eq!(
            index.entry(0, 2.0),
            Some(AlignmentEntry {
                old_y: None,
                new_y: Some(3.0),
                lifecycle: PointLifecycle::Persistent,
            })
        );
    }

    #[test]
    fn slot_count_is_max_of_both_generations() {
        let old = generation(&[&[(0.0, 1.0)]]);
        let new = generation(&[&[(0.0, 1.0)], &[], &[(5.0, 5.0)]]);
        assert_eq!(AlignmentIndex::build(&old, &new).slot_count(), 3);
        assert_eq!(AlignmentIndex::build(&new, &old).slot_count(), 3);
    }

    #[test]
    fn entries_iterate_in_ascending_x_regardless_of_input_order() {
        let old = generation(&[&[(9.0, 1.0), (-3.0, 1.0)]]);
        let new = generation(&[&[(4.0, 2.0), (0.5, 2.0)]]);
        let index = AlignmentIndex::build(&old, &new);

        let keys: Vec<f64> = index.entries(0).map(|(x, _)| x).collect();
        assert_eq!(keys, vec![-3.0, 0.5, 4.0, 9.0]);
        assert_eq!(index.entries(7).count(), 0);
    }

    #[test]
    fn progress_diff_drops_transient_entries_only_at_completion() {
        let old = generation(&[&[(0.0, 4.0)], &[(1.0, 8.0)]]);
        let new = generation(&[&[(0.0, 2.0)]]);
        let index = AlignmentIndex::build(&old, &new);

        let mid = index.progress_diff(Progress::new(0.5).expect("progress"));
        assert_eq!(
            mid,
            vec![vec![DataPoint::new(0.0, 3.0)], vec![DataPoint::new(1.0, 4.0)]]
        );

        let end = index.progress_diff(Progress::END);
        assert_eq!(end, vec![vec![DataPoint::new(0.0, 2.0)]]);
    }

    #[test]
    fn empty_slots_are_omitted_from_output() {
        let old = generation(&[&[], &[(1.0, 1.0)]]);
        let new = generation(&[&[], &[(1.0, 3.0)]]);
        let index = AlignmentIndex::build(&old, &new);

        let start = index.progress_diff(Progress::START);
        assert_eq!(start, vec![vec![DataPoint::new(1.0, 1.0)]]);
    }
}
