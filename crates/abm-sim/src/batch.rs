//! Batch runner for parameter sweeps.
//!
//! Each [`RunSpec`] is one independent run: its own `Config` (the base plus
//! one override), its own population, network, and random stream.  Runs
//! share nothing but the read-only base `Config`, so with the `parallel`
//! feature they execute on Rayon's thread pool.  Results come back in input
//! order either way.

use abm_core::Config;
use log::{info, warn};

use crate::{RunSummary, SimBuilder, SimResult};

/// Parameters swept by [`default_sweep`], with the values tried for each.
pub const SWEEP_GRID: &[(&str, &[f64])] = &[
    ("covid_spread_chance_pct", &[2.0, 5.0, 10.0, 20.0]),
    ("initial_infected_agents", &[2.0, 5.0, 10.0, 20.0]),
    ("precaution_pct",          &[0.0, 30.0, 50.0, 80.0]),
    ("avg_degree",              &[10.0, 30.0, 50.0, 70.0]),
    ("v_start_time",            &[0.0, 30.0, 180.0, 360.0]),
    ("vaccination_pct",         &[0.0, 30.0, 50.0, 80.0]),
];

/// One run of a sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSpec {
    /// `Config` field overridden for this run.
    pub param_name:  String,
    pub param_value: f64,
    /// Replicate index within this parameter value.
    pub run:         u32,
    pub agents:      usize,
    pub seed:        u64,
}

impl RunSpec {
    /// A replicate of `param_name = param_value` seeded `base_seed + run`.
    pub fn new(param_name: &str, param_value: f64, run: u32, agents: usize, base_seed: u64) -> Self {
        Self {
            param_name: param_name.to_owned(),
            param_value,
            run,
            agents,
            seed: base_seed.wrapping_add(u64::from(run)),
        }
    }

    /// Build and run this replicate on top of `base`.
    pub fn execute(&self, base: &Config) -> SimResult<RunSummary> {
        let config = base
            .clone()
            .with_overrides([(self.param_name.as_str(), self.param_value)])?;
        SimBuilder::new(self.agents, self.seed, config).build()?.run_quiet()
    }
}

/// A finished run and the `RunSpec` that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRecord {
    pub spec:    RunSpec,
    pub summary: RunSummary,
}

/// Every value of [`SWEEP_GRID`], `runs_per_value` replicates each.
pub fn default_sweep(runs_per_value: u32, agents: usize, base_seed: u64) -> Vec<RunSpec> {
    let mut specs = Vec::new();
    for &(name, values) in SWEEP_GRID {
        for &value in values {
            for run in 0..runs_per_value {
                specs.push(RunSpec::new(name, value, run, agents, base_seed));
            }
        }
    }
    specs
}

/// Execute every `RunSpec` against `base`.
///
/// A failed run is logged and left out of the result; the remaining runs
/// still execute.
pub fn run_batch(base: &Config, specs: &[RunSpec]) -> Vec<RunRecord> {
    info!("running {} specs", specs.len());

    #[cfg(not(feature = "parallel"))]
    let records: Vec<Option<RunRecord>> = specs.iter().map(|spec| try_run(base, spec)).collect();

    #[cfg(feature = "parallel")]
    let records: Vec<Option<RunRecord>> = {
        use rayon::prelude::*;
        specs.par_iter().map(|spec| try_run(base, spec)).collect()
    };

    records.into_iter().flatten().collect()
}

fn try_run(base: &Config, spec: &RunSpec) -> Option<RunRecord> {
    match spec.execute(base) {
        Ok(summary) => Some(RunRecord { spec: spec.clone(), summary }),
        Err(e) => {
            warn!(
                "run {} of {}={} failed: {e}",
                spec.run, spec.param_name, spec.param_value,
            );
            None
        }
    }
}
