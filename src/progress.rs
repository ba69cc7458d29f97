//! Progress reporting for a translation run.
//!
//! Inject an `Arc<dyn ProgressCallback>` via
//! [`crate::config::TranslationConfigBuilder::progress_callback`] to receive
//! an event after each page finishes translating.
//!
//! # Why callbacks instead of channels?
//!
//! The callback is the least-invasive integration point: callers can forward
//! events to a terminal progress bar, a web socket, or a database record
//! without the library knowing how the host application communicates. The
//! trait is `Send + Sync` so a future parallel translation pass would not
//! change the contract.
//!
//! Progress is a fraction in `[0.0, 1.0]`: `completed / total` pages across
//! the whole run, clamped, and monotonically non-decreasing. The fraction is
//! computed by the run-scoped [`ProgressTracker`] — there is no ambient
//! global state, so concurrent runs never see each other's counters.

use std::sync::Arc;

/// Called by the pipeline as the run advances.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ProgressCallback: Send + Sync {
    /// Called once after extraction, before any page is translated.
    ///
    /// `total_pages` is the page count across all input files.
    fn on_run_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after each page completes translation.
    ///
    /// `fraction` is `completed / max(total_pages, 1)` clamped to 1.0, and
    /// never decreases within a run.
    fn on_page_complete(&self, completed: usize, total_pages: usize, fraction: f64) {
        let _ = (completed, total_pages, fraction);
    }

    /// Called once after the document has been assembled.
    fn on_run_complete(&self, total_pages: usize) {
        let _ = total_pages;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {}

/// Convenience alias matching the type stored in
/// [`crate::config::TranslationConfig`].
pub type SharedProgressCallback = Arc<dyn ProgressCallback>;

/// Run-scoped completed/total counter.
///
/// Owned by a single run; advancing it is the only way the fraction moves,
/// which makes monotonicity structural rather than something callers must
/// remember to preserve.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    completed: usize,
    total: usize,
}

impl ProgressTracker {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    /// Record one completed page and return the new fraction.
    pub(crate) fn advance(&mut self) -> f64 {
        self.completed += 1;
        self.fraction()
    }

    pub(crate) fn completed(&self) -> usize {
        self.completed
    }

    /// `completed / total`, with a zero-total guard and clamped to 1.0.
    pub(crate) fn fraction(&self) -> f64 {
        (self.completed as f64 / self.total.max(1) as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn fraction_is_exactly_k_over_n() {
        let mut tracker = ProgressTracker::new(4);
        assert_eq!(tracker.fraction(), 0.0);
        assert_eq!(tracker.advance(), 0.25);
        assert_eq!(tracker.advance(), 0.5);
        assert_eq!(tracker.advance(), 0.75);
        assert_eq!(tracker.advance(), 1.0);
    }

    #[test]
    fn zero_total_does_not_divide_by_zero() {
        let mut tracker = ProgressTracker::new(0);
        assert_eq!(tracker.fraction(), 0.0);
        // Even a spurious advance stays clamped and finite.
        assert_eq!(tracker.advance(), 1.0);
    }

    #[test]
    fn fraction_is_clamped_to_one() {
        let mut tracker = ProgressTracker::new(2);
        tracker.advance();
        tracker.advance();
        assert_eq!(tracker.advance(), 1.0);
    }

    #[test]
    fn fraction_is_monotonic() {
        let mut tracker = ProgressTracker::new(7);
        let mut last = 0.0;
        for _ in 0..10 {
            let f = tracker.advance();
            assert!(f >= last);
            last = f;
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgress;
        cb.on_run_start(5);
        cb.on_page_complete(1, 5, 0.2);
        cb.on_run_complete(5);
    }

    struct RecordingCallback {
        pages: AtomicUsize,
        fractions: Mutex<Vec<f64>>,
    }

    impl ProgressCallback for RecordingCallback {
        fn on_page_complete(&self, _completed: usize, _total: usize, fraction: f64) {
            self.pages.fetch_add(1, Ordering::SeqCst);
            self.fractions.lock().unwrap().push(fraction);
        }
    }

    #[test]
    fn recording_callback_receives_events() {
        let cb = RecordingCallback {
            pages: AtomicUsize::new(0),
            fractions: Mutex::new(Vec::new()),
        };
        let mut tracker = ProgressTracker::new(2);
        for _ in 0..2 {
            let fraction = tracker.advance();
            cb.on_page_complete(tracker.completed(), 2, fraction);
        }

        assert_eq!(cb.pages.load(Ordering::SeqCst), 2);
        assert_eq!(*cb.fractions.lock().unwrap(), vec![0.5, 1.0]);
    }
}
