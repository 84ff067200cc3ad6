use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::core::{Generation, Progress, ValueRange, canonicalize_generation};
use crate::error::TransitionResult;

use super::{DiffProcessorConfig, TransitionFrame, TransitionState};

/// Engine seam used by animation drivers and renderers.
///
/// A producer replaces the data with `set_entries*`; a consumer asks for the
/// interpolated data and axis ranges once per frame. Progress `0.0` is the old
/// generation and `1.0` the new one.
pub trait DiffProcessor: Send + Sync {
    /// Starts a transition from the currently stored new generation to `new`.
    fn set_entries(&self, new: Generation) -> TransitionResult<()>;

    /// Starts a transition from `old` to `new`.
    fn set_entries_with_old(&self, old: Generation, new: Generation) -> TransitionResult<()>;

    /// Interpolated series at `progress`, each in ascending `x` order.
    fn progress_diff(&self, progress: f64) -> TransitionResult<Generation>;

    /// Interpolated plain y-axis range at `progress`.
    fn y_range_progress_diff(&self, progress: f64) -> TransitionResult<ValueRange>;

    /// Interpolated stacked y-axis range at `progress`.
    fn stacked_y_range_progress_diff(&self, progress: f64) -> TransitionResult<ValueRange>;
}

/// Default `DiffProcessor`.
///
/// Writers are serialized and build the next `TransitionState` before
/// publishing it with a pointer swap. Readers clone the current state under a
/// short read lock, so a reader arriving mid-rebuild sees the previous
/// complete version rather than waiting for the rebuild to finish.
#[derive(Debug)]
pub struct DefaultDiffProcessor {
    config: DiffProcessorConfig,
    writer: Mutex<()>,
    state: RwLock<Arc<TransitionState>>,
}

impl DefaultDiffProcessor {
    #[must_use]
    pub fn new(config: DiffProcessorConfig) -> Self {
        Self {
            config,
            writer: Mutex::new(()),
            state: RwLock::new(Arc::new(TransitionState::default())),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DiffProcessorConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> DiffProcessorConfig {
        self.config
    }

    /// Current published state. Queries against it stay consistent with each
    /// other even if a writer publishes a newer state meanwhile.
    #[must_use]
    pub fn state(&self) -> Arc<TransitionState> {
        Arc::clone(&self.state.read())
    }

    #[must_use]
    pub fn old_entries(&self) -> Generation {
        self.state().old_entries().to_vec()
    }

    #[must_use]
    pub fn new_entries(&self) -> Generation {
        self.state().new_entries().to_vec()
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.state().slot_count()
    }

    /// Animates all current data out.
    pub fn clear(&self) -> TransitionResult<()> {
        self.set_entries(Vec::new())
    }

    /// Series and both axis ranges at `progress`, computed from a single
    /// published state.
    pub fn frame(&self, progress: f64) -> TransitionResult<TransitionFrame> {
        let progress = self.resolve(progress)?;
        Ok(TransitionFrame::from_state(&self.state(), progress))
    }

    fn resolve(&self, progress: f64) -> TransitionResult<Progress> {
        Progress::resolve(progress, self.config.progress_policy)
    }

    /// Caller must hold `self.writer`.
    fn publish(&self, next: TransitionState) {
        debug!(
            slots = next.slot_count(),
            old_points = next.old_point_count(),
            new_points = next.new_point_count(),
            old_y_range = ?next.ranges().old_y,
            new_y_range = ?next.ranges().new_y,
            "set transition entries"
        );
        *self.state.write() = Arc::new(next);
    }
}

impl Default for DefaultDiffProcessor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl DiffProcessor for DefaultDiffProcessor {
    fn set_entries(&self, new: Generation) -> TransitionResult<()> {
        let _writer = self.writer.lock();
        let new = canonicalize_generation(new, self.config.non_finite_policy)?;
        let old = self.state.read().new_entries().to_vec();
        self.publish(TransitionState::build(old, new));
        Ok(())
    }

    fn set_entries_with_old(&self, old: Generation, new: Generation) -> TransitionResult<()> {
        let _writer = self.writer.lock();
        let next = TransitionState::new(old, new, self.config.non_finite_policy)?;
        self.publish(next);
        Ok(())
    }

    fn progress_diff(&self, progress: f64) -> TransitionResult<Generation> {
        let progress = self.resolve(progress)?;
        let series = self.state().progress_diff_at(progress);
        trace!(
            progress = progress.value(),
            slots = series.len(),
            "progress diff"
        );
        Ok(series)
    }

    fn y_range_progress_diff(&self, progress: f64) -> TransitionResult<ValueRange> {
        let progress = self.resolve(progress)?;
        Ok(self.state().y_range_at(progress))
    }

    fn stacked_y_range_progress_diff(&self, progress: f64) -> TransitionResult<ValueRange> {
        let progress = self.resolve(progress)?;
        Ok(self.state().stacked_y_range_at(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultDiffProcessor, DiffProcessor};
    use crate::api::DiffProcessorConfig;
    use crate::core::{DataPoint, NonFinitePolicy};

    #[test]
    fn processor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DefaultDiffProcessor>();
    }

    #[test]
    fn rejected_write_keeps_previous_state() {
        let processor = DefaultDiffProcessor::new(
            DiffProcessorConfig::default().with_non_finite_policy(NonFinitePolicy::Reject),
        );
        processor
            .set_entries(vec![vec![DataPoint::new(0.0, 1.0)]])
            .expect("first write");
        let before = processor.state();

        let result = processor.set_entries(vec![vec![DataPoint::new(1.0, f64::NAN)]]);

        assert!(result.is_err());
        assert_eq!(*processor.state(), *before);
    }

    #[test]
    fn held_state_is_unaffected_by_later_writes() {
        let processor = DefaultDiffProcessor::default();
        processor
            .set_entries(vec![vec![DataPoint::new(0.0, 1.0)]])
            .expect("first write");
        let held = processor.state();

        processor
            .set_entries(vec![vec![DataPoint::new(0.0, 5.0)]])
            .expect("second write");

        assert_eq!(held.new_entries(), &[vec![DataPoint::new(0.0, 1.0)]]);
        assert_eq!(
            processor.state().old_entries(),
            &[vec![DataPoint::new(0.0, 1.0)]]
        );
    }
}
