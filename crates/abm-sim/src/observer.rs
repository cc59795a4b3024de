//! Simulation observer trait for progress reporting and data collection.

use abm_core::Day;

use crate::{DaySummary, RunSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at day boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: peak tracker
///
/// ```rust,ignore
/// struct Peak { day: Day, infected: usize }
///
/// impl SimObserver for Peak {
///     fn on_day_end(&mut self, s: &DaySummary) {
///         if s.infected > self.infected {
///             self.day = s.day;
///             self.infected = s.infected;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each day, before any processing.
    fn on_day_start(&mut self, _day: Day) {}

    /// Called after every phase of the day has run.
    fn on_day_end(&mut self, _summary: &DaySummary) {}

    /// Called once after the final day, including on early termination.
    fn on_sim_end(&mut self, _result: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
