//! Fluent builder for constructing a [`Sim`].

use abm_agent::PopulationBuilder;
use abm_core::{AgentId, Config, SimClock, SimRng};
use abm_disease::seed_initial_infections;
use abm_network::build_random_network;
use log::debug;

use crate::{Sim, SimError, SimResult};

/// Child-stream offset for the contact network.
///
/// The network stream is split off the root before any demographic draw,
/// so the same seed always yields the same network.
pub const NETWORK_STREAM: u64 = 1;

/// Fluent builder for [`Sim`].
///
/// # Initialization order
///
/// 1. Root `SimRng` from the seed; network child stream split off.
/// 2. Contact network from the child stream.
/// 3. Population with demographics and super-immune selection (root stream).
/// 4. Forced super-immune agents, if any.
/// 5. Initial infections on day 0 (root stream).
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(1_000, 7, Config::default())
///     .force_super_immune(AgentId(0))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    agent_count:         usize,
    seed:                u64,
    config:              Config,
    forced_super_immune: Vec<AgentId>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(agent_count: usize, seed: u64, config: Config) -> Self {
        Self {
            agent_count,
            seed,
            config,
            forced_super_immune: Vec::new(),
        }
    }

    /// Make `agent` super-immune regardless of the random selection.
    ///
    /// Applied before the initial infections are drawn, so a forced agent
    /// is never seeded.
    pub fn force_super_immune(mut self, agent: AgentId) -> Self {
        self.forced_super_immune.push(agent);
        self
    }

    /// Validate inputs, build the network and population, seed the initial
    /// infections, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let n = self.agent_count;
        if n == 0 {
            return Err(SimError::EmptyPopulation);
        }
        if let Some(&agent) = self.forced_super_immune.iter().find(|a| a.index() >= n) {
            return Err(SimError::AgentOutOfRange(agent, n));
        }
        self.config.validate()?;

        let mut rng = SimRng::new(self.seed);
        let mut network_rng = rng.child(NETWORK_STREAM);
        let network = build_random_network(n, self.config.avg_degree, &mut network_rng);

        let mut builder = PopulationBuilder::new(n).demographics(&self.config);
        for &agent in &self.forced_super_immune {
            builder = builder.force_super_immune(agent);
        }
        let mut population = builder.build(&mut rng);

        let seeds = seed_initial_infections(&mut population, &self.config, &mut rng);
        debug!(
            "built run: {n} agents, {} edges, {} seeded infections, seed {}",
            network.edge_count(),
            seeds.len(),
            self.seed,
        );

        Ok(Sim {
            clock: SimClock::new(self.config.max_days),
            config: self.config,
            population,
            network,
            rng,
            reinfected: 0,
            min_productivity: 100.0,
        })
    }
}

/// Build a ready run from an agent count, a seed, and `(name, value)`
/// overrides on top of the default [`Config`].
///
/// Unknown override names fail with [`AbmError::UnknownParameter`][abm_core::AbmError].
pub fn initialize<I, K>(agent_count: usize, seed: u64, overrides: I) -> SimResult<Sim>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let config = Config::default().with_overrides(overrides)?;
    SimBuilder::new(agent_count, seed, config).build()
}
