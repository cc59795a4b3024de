//! Vaccination: a one-shot rollout plus daily aging and boosters.

use abm_agent::Population;
use abm_core::{AgentId, Config, SimRng};
use log::debug;

/// Days after a dose at which a booster decision is made.
pub const BOOSTER_INTERVAL_DAYS: u32 = 180;

/// Bring coverage up to `floor(N * vaccination_pct / 100)` by vaccinating
/// randomly chosen unvaccinated agents.
///
/// Does nothing (and draws nothing) when coverage already meets the
/// target.  Returns the number of agents newly vaccinated.
pub fn rollout(pop: &mut Population, config: &Config, rng: &mut SimRng) -> usize {
    let target = (pop.count as f64 * config.vaccination_pct / 100.0).floor().max(0.0) as usize;
    let current = pop.count_vaccinated();
    if current >= target {
        return 0;
    }

    let pool: Vec<AgentId> = pop
        .agent_ids()
        .filter(|a| !pop.vaccinated[a.index()])
        .collect();
    let chosen = rng.sample_without_replacement(&pool, target - current);
    for agent in &chosen {
        pop.vaccinated[agent.index()] = true;
        pop.vaccinated_time[agent.index()] = 1;
    }
    debug!("vaccination rollout: {} agents ({} -> {})", chosen.len(), current, current + chosen.len());
    chosen.len()
}

/// Age every vaccinated agent by one day.  Agents reaching
/// [`BOOSTER_INTERVAL_DAYS`] roll `boosted_pct`: success restarts their
/// clock, failure drops them back to unvaccinated.
pub fn age_and_boost(pop: &mut Population, config: &Config, rng: &mut SimRng) {
    for i in 0..pop.count {
        if !pop.vaccinated[i] {
            continue;
        }
        pop.vaccinated_time[i] += 1;
        if pop.vaccinated_time[i] < BOOSTER_INTERVAL_DAYS {
            continue;
        }
        if rng.roll_pct(config.boosted_pct) {
            pop.vaccinated_time[i] = 1;
        } else {
            pop.vaccinated[i] = false;
            pop.vaccinated_time[i] = 0;
        }
    }
}
