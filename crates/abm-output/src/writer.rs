//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DayRow, OutputResult, RunRow};

/// Sink for daily and per-run rows.
///
/// Errors from observer-driven writes are stored by the observer and
/// retrieved with [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one day of the time series.
    fn write_day(&mut self, row: &DayRow) -> OutputResult<()>;

    /// Write a batch of per-run result rows.
    fn write_runs(&mut self, rows: &[RunRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
