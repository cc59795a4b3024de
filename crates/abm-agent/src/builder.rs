//! Fluent builder for constructing a `Population`.
//!
//! # Usage
//!
//! ```rust
//! use abm_agent::PopulationBuilder;
//! use abm_core::{Config, SimRng};
//!
//! let config = Config::default();
//! let mut rng = SimRng::new(42);
//! let pop = PopulationBuilder::new(1_000)
//!     .demographics(&config)
//!     .build(&mut rng);
//!
//! assert_eq!(pop.count, 1_000);
//! assert!(pop.age.iter().all(|&a| a < 100));
//! ```

use abm_core::{AgentId, Config, SimRng};

use crate::Population;
use crate::demographics::assign_demographics;

/// Fluent builder for [`Population`].
///
/// All arrays are pre-allocated at construction time so later writes are
/// indexed assignments, never pushes.
pub struct PopulationBuilder<'c> {
    count: usize,
    config: Option<&'c Config>,
    forced_super_immune: Vec<AgentId>,
}

impl<'c> PopulationBuilder<'c> {
    /// Create a builder for `count` agents.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            config: None,
            forced_super_immune: Vec::new(),
        }
    }

    /// Draw demographics from `config` during [`build`](Self::build).
    ///
    /// Without this, every agent keeps the neutral defaults (age 0, female,
    /// risk level 1, not super-immune) and no draws are made.
    pub fn demographics(mut self, config: &'c Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Mark `agent` super-immune after the random selection, regardless of
    /// what the draw chose.  Out-of-range ids are ignored.
    pub fn force_super_immune(mut self, agent: AgentId) -> Self {
        self.forced_super_immune.push(agent);
        self
    }

    /// Construct the `Population`, drawing from `rng` if demographics were
    /// requested.
    pub fn build(self, rng: &mut SimRng) -> Population {
        let mut pop = Population::new(self.count);
        if let Some(config) = self.config {
            assign_demographics(&mut pop, config, rng);
        }
        for agent in self.forced_super_immune {
            if pop.contains(agent) {
                pop.super_immune[agent.index()] = true;
            }
        }
        pop
    }
}
