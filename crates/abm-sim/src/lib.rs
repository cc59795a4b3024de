//! `abm-sim`: daily driver for the Long-COVID epidemic ABM.
//!
//! # Daily loop
//!
//! ```text
//! for day in 0..config.max_days:
//!   ① Rollout:     one-shot vaccination when day == v_start_time.
//!   ② Long COVID:  recovery rolls, then deferred onsets due today
//!                   (skipped when long_covid = false).
//!   ③ Infected:    timers, symptom flags, onset pathways, → immune.
//!   ④ Transmission: infectious sources expose their neighbors.
//!   ⑤ Immune:      timers; immunity wanes.
//!   ⑥ Vaccination: timers; booster decisions.
//!   ⑦ Productivity: record the day's value and the running minimum.
//!   stop early once nobody is infected or immune.
//! ```
//!
//! Every phase walks agents in ascending index order and draws from the
//! run's single `SimRng`, so a seed and a `Config` fix the whole run.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `batch::run_batch` runs specs on Rayon's thread pool.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use abm_sim::initialize;
//!
//! let mut sim = initialize(10_000, 42, [("vaccination_pct", 50.0)])?;
//! let result = sim.run_quiet()?;
//! println!("{} agents infected in {} days", result.infected, result.runtime_days);
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod summary;


pub use batch::{RunRecord, RunSpec, default_sweep, run_batch};
pub use builder::{NETWORK_STREAM, SimBuilder, initialize};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use summary::{DaySummary, RunSummary};
