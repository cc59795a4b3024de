//! Per-day and per-run result records.

use abm_core::Day;

/// Population counts at the end of one simulated day.
#[derive(Clone, Debug, PartialEq)]
pub struct DaySummary {
    pub day:              Day,
    pub infected:         usize,
    pub immune:           usize,
    pub symptomatic:      usize,
    pub long_covid:       usize,
    pub vaccinated:       usize,
    /// Reinfections produced by today's transmission step.
    pub new_reinfections: u32,
    pub productivity:     f64,
}

/// The result record of one complete run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Last simulated day index + 1; 0 when no day was simulated.
    pub runtime_days:     u32,
    /// Agents with at least one lifetime infection.
    pub infected:         usize,
    /// Cumulative reinfection tally over all days.
    pub reinfected:       u64,
    /// Agents LC-active at the end of the run.
    pub long_covid_cases: usize,
    /// Lowest daily productivity seen; 100 when no day was simulated.
    pub min_productivity: f64,
}
