//! Infection lifecycle.
//!
//! # Per-agent timeline (timer days since infection)
//!
//! ```text
//!  0        1                 1+contagious                infected_period
//!  |--------|====infectious====|---------------------------|→ immune, timer = 0
//!              |~~~~~~~~~ symptomatic ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~→
//!         symptomatic_start        (symptomatic_start + symptomatic_duration)
//! ```
//!
//! Symptoms may outlast the infected period; `symptomatic` is only
//! recomputed while the agent is infected.

use abm_agent::Population;
use abm_core::{AgentId, Config, Day, SimRng};

use crate::long_covid::{assign_group, onset_probability, worsen_on_reinfection};

/// Symptom-duration multiplier for agents already carrying Long COVID.
const LC_SYMPTOM_MULTIPLIER: f64 = 1.5;

/// Infect `agent` on `day`.
///
/// Returns `false` without touching state or drawing if the agent is
/// super-immune.
///
/// Draw order: contagious days, asymptomatic roll, then for symptomatic
/// courses the incubation days, the symptom-length normal, and (when LC is
/// active) the escalation roll.
pub fn infect(
    pop:    &mut Population,
    agent:  AgentId,
    day:    Day,
    config: &Config,
    rng:    &mut SimRng,
) -> bool {
    let i = agent.index();
    if pop.super_immune[i] {
        return false;
    }

    pop.infected[i] = true;
    pop.immuned[i] = false;
    pop.infection_start_tick[i] = day.0;
    pop.virus_check_timer[i] = 0;
    pop.number_of_infection[i] += 1;

    // ── Contagious window ─────────────────────────────────────────────────
    let contagious = (1 + rng.below(config.active_duration)).min(config.max_contagious_days());
    pop.transfer_active_duration[i] = contagious;
    pop.infectious_start[i] = 1;
    pop.infectious_end[i] = 1 + contagious;

    // ── Symptoms ──────────────────────────────────────────────────────────
    if rng.roll_pct(config.asymptomatic_pct) {
        pop.symptomatic_start[i] = 0;
        pop.symptomatic_duration[i] = 0;
    } else {
        let incubation = (1 + rng.below(config.incubation_period)).min(contagious);
        pop.symptomatic_start[i] = incubation;

        let base = rng
            .normal(config.symptomatic_duration_mid, config.symptomatic_duration_dev)
            .max(config.symptomatic_duration_min)
            .min(config.symptomatic_duration_max);
        let reinfection_days = f64::from(config.effect_of_reinfection) * f64::from(pop.number_of_infection[i]);
        let mut symptom_days = (base + reinfection_days) as u32;

        if pop.is_lc_active(agent) {
            symptom_days = (f64::from(symptom_days) * LC_SYMPTOM_MULTIPLIER) as u32;
            worsen_on_reinfection(pop, agent, rng);
        }
        pop.symptomatic_duration[i] = symptom_days;
    }

    // Clear anything left over from an earlier, recovered episode.
    if !pop.is_lc_active(agent) {
        pop.clear_long_covid(agent);
    }
    true
}

/// Infect `min(initial_infected_agents, eligible)` distinct agents on day 0,
/// drawn without replacement from the agents that are not super-immune.
///
/// Returns the seeded agents in infection order.
pub fn seed_initial_infections(pop: &mut Population, config: &Config, rng: &mut SimRng) -> Vec<AgentId> {
    let eligible: Vec<AgentId> = pop
        .agent_ids()
        .filter(|a| !pop.super_immune[a.index()])
        .collect();
    let amount = (config.initial_infected_agents as usize).min(pop.count);
    let seeds = rng.sample_without_replacement(&eligible, amount);
    for &agent in &seeds {
        infect(pop, agent, Day::ZERO, config, rng);
    }
    seeds
}

/// Advance every infected agent by one day.
///
/// Recomputes `symptomatic`, evaluates the three Long-COVID onset pathways
/// for agents not already LC-active, and moves agents that reach
/// `infected_period` to the immune state.
pub fn update_infected(pop: &mut Population, config: &Config, rng: &mut SimRng) {
    for i in 0..pop.count {
        if !pop.infected[i] {
            continue;
        }
        let agent = AgentId(i as u32);

        pop.virus_check_timer[i] += 1;
        let timer = pop.virus_check_timer[i];
        let start = pop.symptomatic_start[i];
        let duration = pop.symptomatic_duration[i];

        pop.symptomatic[i] = start > 0 && timer >= start && timer < start.saturating_add(duration);

        if config.long_covid && !pop.is_lc_active(agent) {
            check_onset_pathways(pop, agent, config, rng);
        }

        if timer >= config.infected_period {
            pop.infected[i] = false;
            pop.immuned[i] = true;
            pop.virus_check_timer[i] = 0;
        }
    }
}

/// The three mutually exclusive onset pathways, keyed on the symptom course.
///
/// - asymptomatic: one roll when the infection ends, onset deferred
/// - long symptomatic course: certain onset at `start + threshold`
/// - short symptomatic course: one roll when symptoms end, onset deferred
fn check_onset_pathways(pop: &mut Population, agent: AgentId, config: &Config, rng: &mut SimRng) {
    let i = agent.index();
    let timer = pop.virus_check_timer[i];
    let start = pop.symptomatic_start[i];
    let duration = pop.symptomatic_duration[i];
    let threshold = config.long_covid_time_threshold;

    if start == 0 {
        if timer >= config.infected_period {
            let p = onset_probability(pop, agent, config, true);
            if rng.roll_pct(p) {
                schedule_onset(pop, agent, threshold);
            }
        }
    } else if duration > threshold {
        if timer == start.saturating_add(threshold) {
            assign_group(pop, agent, config, rng);
        }
    } else if timer == start.saturating_add(duration) {
        let p = onset_probability(pop, agent, config, false);
        if rng.roll_pct(p) {
            schedule_onset(pop, agent, threshold);
        }
    }
}

fn schedule_onset(pop: &mut Population, agent: AgentId, threshold: u32) {
    let i = agent.index();
    pop.lc_pending[i] = true;
    pop.lc_onset_day[i] = pop.infection_start_tick[i].saturating_add(threshold);
}

/// Advance every immune agent by one day; immunity ends once the timer
/// reaches `infected_period + immune_period`.
pub fn update_immune(pop: &mut Population, config: &Config) {
    let immunity_end = config.immunity_end();
    for i in 0..pop.count {
        if !pop.immuned[i] {
            continue;
        }
        pop.virus_check_timer[i] += 1;
        if pop.virus_check_timer[i] >= immunity_end {
            pop.immuned[i] = false;
            pop.virus_check_timer[i] = 0;
        }
    }
}
