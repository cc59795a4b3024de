//! CSV output backend.
//!
//! Writes up to two files in the configured output directory:
//! - `daily_series.csv`, created on the first `write_day`
//! - `runs.csv`, created on the first `write_runs`
//!
//! A file that never receives a row is never created.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::row::RUN_COLUMNS;
use crate::writer::OutputWriter;
use crate::{DayRow, OutputResult, RunRow};

pub const DAILY_FILE: &str = "daily_series.csv";
pub const RUNS_FILE: &str = "runs.csv";

const DAY_COLUMNS: [&str; 8] = [
    "day",
    "infected",
    "immune",
    "symptomatic",
    "long_covid",
    "vaccinated",
    "new_reinfections",
    "productivity",
];

/// Writes simulation output to CSV files, opening each on first use.
pub struct CsvWriter {
    dir:      PathBuf,
    days:     Option<Writer<File>>,
    runs:     Option<Writer<File>>,
    finished: bool,
}

impl CsvWriter {
    /// Target `dir`, which must already exist.  No file is created yet.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        if !fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(io::ErrorKind::NotADirectory, dir.display().to_string()).into());
        }
        Ok(Self {
            dir:      dir.to_path_buf(),
            days:     None,
            runs:     None,
            finished: false,
        })
    }

    /// Path of the daily time-series file.
    pub fn daily_path(&self) -> PathBuf {
        self.dir.join(DAILY_FILE)
    }

    /// Path of the per-run results file.
    pub fn runs_path(&self) -> PathBuf {
        self.dir.join(RUNS_FILE)
    }
}

/// Return the open writer in `slot`, creating the file and its header first.
fn open<'a>(slot: &'a mut Option<Writer<File>>, path: PathBuf, header: &[&str]) -> OutputResult<&'a mut Writer<File>> {
    let w = match slot.take() {
        Some(w) => w,
        None => {
            let mut w = Writer::from_path(path)?;
            w.write_record(header)?;
            w
        }
    };
    Ok(slot.insert(w))
}

impl OutputWriter for CsvWriter {
    fn write_day(&mut self, row: &DayRow) -> OutputResult<()> {
        let path = self.daily_path();
        let days = open(&mut self.days, path, &DAY_COLUMNS)?;
        days.write_record(&[
            row.day.to_string(),
            row.infected.to_string(),
            row.immune.to_string(),
            row.symptomatic.to_string(),
            row.long_covid.to_string(),
            row.vaccinated.to_string(),
            row.new_reinfections.to_string(),
            format!("{:.4}", row.productivity),
        ])?;
        Ok(())
    }

    fn write_runs(&mut self, rows: &[RunRow]) -> OutputResult<()> {
        let path = self.runs_path();
        let runs = open(&mut self.runs, path, &RUN_COLUMNS)?;
        for row in rows {
            runs.write_record(&[
                row.runtime_days.to_string(),
                row.infected.to_string(),
                row.reinfected.to_string(),
                row.long_covid_cases.to_string(),
                format!("{:.4}", row.min_productivity),
                row.param_name.clone(),
                row.param_value.to_string(),
                row.run.to_string(),
                row.agents.to_string(),
                row.backend.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if let Some(days) = self.days.as_mut() {
            days.flush()?;
        }
        if let Some(runs) = self.runs.as_mut() {
            runs.flush()?;
        }
        Ok(())
    }
}
