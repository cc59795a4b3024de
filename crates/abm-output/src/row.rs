//! Plain data row types written by output backends.

use abm_sim::{DaySummary, RunRecord, RunSpec, RunSummary};

/// Backend label recorded in every [`RunRow`].
pub const CPU_BACKEND: &str = "cpu";

/// Column names of a run row, in write order.  Downstream aggregation
/// reads these by name.
pub const RUN_COLUMNS: [&str; 10] = [
    "runtime_days",
    "infected",
    "reinfected",
    "long_covid_cases",
    "min_productivity",
    "param_name",
    "param_value",
    "run",
    "agents",
    "backend",
];

/// Population counts at the end of one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayRow {
    pub day:              u32,
    pub infected:         u64,
    pub immune:           u64,
    pub symptomatic:      u64,
    pub long_covid:       u64,
    pub vaccinated:       u64,
    pub new_reinfections: u32,
    pub productivity:     f64,
}

impl From<&DaySummary> for DayRow {
    fn from(s: &DaySummary) -> Self {
        Self {
            day:              s.day.0,
            infected:         s.infected as u64,
            immune:           s.immune as u64,
            symptomatic:      s.symptomatic as u64,
            long_covid:       s.long_covid as u64,
            vaccinated:       s.vaccinated as u64,
            new_reinfections: s.new_reinfections,
            productivity:     s.productivity,
        }
    }
}

/// One run's result record plus the metadata identifying the run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRow {
    pub runtime_days:     u32,
    pub infected:         u64,
    pub reinfected:       u64,
    pub long_covid_cases: u64,
    pub min_productivity: f64,
    pub param_name:       String,
    pub param_value:      f64,
    pub run:              u32,
    pub agents:           u64,
    pub backend:          String,
}

impl RunRow {
    /// Combine a result with the `RunSpec` that produced it.
    pub fn new(summary: &RunSummary, spec: &RunSpec, backend: &str) -> Self {
        Self {
            runtime_days:     summary.runtime_days,
            infected:         summary.infected as u64,
            reinfected:       summary.reinfected,
            long_covid_cases: summary.long_covid_cases as u64,
            min_productivity: summary.min_productivity,
            param_name:       spec.param_name.clone(),
            param_value:      spec.param_value,
            run:              spec.run,
            agents:           spec.agents as u64,
            backend:          backend.to_owned(),
        }
    }
}

impl From<&RunRecord> for RunRow {
    fn from(r: &RunRecord) -> Self {
        RunRow::new(&r.summary, &r.spec, CPU_BACKEND)
    }
}
