//! The `Sim` struct and its daily loop.

use abm_agent::Population;
use abm_core::{Config, SimClock, SimRng};
use abm_disease::{
    activate_pending, age_and_boost, productivity, recovery_pass, rollout, transmission_step,
    update_immune, update_infected,
};
use abm_network::ContactNetwork;
use log::info;

use crate::{DaySummary, NoopObserver, RunSummary, SimObserver, SimResult};

/// Days between progress log lines.
const PROGRESS_INTERVAL_DAYS: u32 = 30;

/// One run of the model: the population, its contact network, and the
/// single random stream every phase draws from.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`initialize`][crate::initialize].
pub struct Sim {
    /// Run configuration.  Read-only once the run is built.
    pub config: Config,

    /// Current day and horizon.
    pub clock: SimClock,

    /// All per-agent state (SoA arrays).
    pub population: Population,

    /// Static contact network, built before the population.
    pub network: ContactNetwork,

    /// The run's random stream.  Draw order is fixed by [`step_day`](Self::step_day).
    pub rng: SimRng,

    /// Cumulative reinfection tally.
    pub reinfected: u64,

    /// Lowest daily productivity seen so far.
    pub min_productivity: f64,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current day until `max_days` or until the epidemic has
    /// died out, whichever comes first.
    ///
    /// Calls observer hooks at every day boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        while !self.clock.is_finished() {
            let day = self.clock.current_day;
            observer.on_day_start(day);
            let summary = self.step_day();
            observer.on_day_end(&summary);
            self.clock.advance();

            if !self.population.epidemic_active() {
                info!("epidemic over on {day}: {} agents ever infected", self.population.count_ever_infected());
                break;
            }
        }
        let result = self.summary();
        observer.on_sim_end(&result);
        Ok(result)
    }

    /// [`run`](Self::run) without callbacks.
    pub fn run_quiet(&mut self) -> SimResult<RunSummary> {
        self.run(&mut NoopObserver)
    }

    /// The result record as of now.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            runtime_days:     self.clock.current_day.0,
            infected:         self.population.count_ever_infected(),
            reinfected:       self.reinfected,
            long_covid_cases: self.population.count_long_covid(),
            min_productivity: self.min_productivity,
        }
    }

    // ── Core day processing ───────────────────────────────────────────────

    /// Simulate the current day.  Does not advance the clock.
    pub fn step_day(&mut self) -> DaySummary {
        let day = self.clock.current_day;
        let pop = &mut self.population;
        let config = &self.config;
        let rng = &mut self.rng;

        // ── Phase 1: vaccination rollout ──────────────────────────────────
        if day.0 == config.v_start_time {
            rollout(pop, config, rng);
        }

        // ── Phase 2: Long-COVID recovery and deferred onsets ──────────────
        if config.long_covid {
            recovery_pass(pop, rng);
            activate_pending(pop, day, config, rng);
        }

        // ── Phase 3: infected timers and onset pathways ───────────────────
        update_infected(pop, config, rng);

        // ── Phase 4: transmission ─────────────────────────────────────────
        let new_reinfections = transmission_step(pop, &self.network, day, config, rng);
        self.reinfected += u64::from(new_reinfections);

        // ── Phase 5–6: immunity and vaccine timers ────────────────────────
        update_immune(pop, config);
        age_and_boost(pop, config, rng);

        // ── Phase 7: productivity ─────────────────────────────────────────
        let productivity = productivity(pop);
        self.min_productivity = self.min_productivity.min(productivity);

        let summary = DaySummary {
            day,
            infected:    pop.count_infected(),
            immune:      pop.count_immune(),
            symptomatic: pop.count_symptomatic(),
            long_covid:  pop.count_long_covid(),
            vaccinated:  pop.count_vaccinated(),
            new_reinfections,
            productivity,
        };
        if day.0.is_multiple_of(PROGRESS_INTERVAL_DAYS) {
            log_progress(&summary);
        }
        summary
    }
}

fn log_progress(s: &DaySummary) {
    info!(
        "{}: infected={} immune={} long_covid={} vaccinated={} productivity={:.2}%",
        s.day, s.infected, s.immune, s.long_covid, s.vaccinated, s.productivity,
    );
}

impl std::fmt::Debug for Sim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sim")
            .field("agents", &self.population.count)
            .field("edges", &self.network.edge_count())
            .field("clock", &self.clock)
            .field("reinfected", &self.reinfected)
            .finish()
    }
}
