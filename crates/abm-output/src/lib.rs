//! `abm-output`: simulation output writers for the Long-COVID epidemic ABM.
//!
//! | Writer      | Files created (each on its first row) |
//! |-------------|---------------------------------------|
//! | `CsvWriter` | `daily_series.csv`, `runs.csv`        |
//!
//! Writers implement [`OutputWriter`].  Daily rows are usually driven by
//! [`SimOutputObserver`], which implements `abm_sim::SimObserver`; run rows
//! are written by whoever orchestrates the runs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use abm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::{CsvWriter, DAILY_FILE, RUNS_FILE};
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CPU_BACKEND, DayRow, RUN_COLUMNS, RunRow};
pub use writer::OutputWriter;
