//! Daily transmission over the contact network.

use abm_agent::Population;
use abm_core::{AgentId, Config, Day, SimRng};
use abm_network::ContactNetwork;

use crate::infection::infect;

/// Percentage points of vaccine efficacy lost per day since the last dose.
const EFFICACY_DECAY_PER_DAY: f64 = 0.11;

/// Guards the age-ratio division against a zero denominator.
const AGE_RATIO_EPSILON: f64 = 1e-9;

/// `true` while `agent` is infected and inside its infectious window.
#[inline]
pub fn is_infectious(pop: &Population, agent: AgentId) -> bool {
    let i = agent.index();
    let timer = pop.virus_check_timer[i];
    pop.infected[i] && pop.infectious_start[i] <= timer && timer < pop.infectious_end[i]
}

/// Vaccine efficacy in percent for an agent `vaccinated_time` days past
/// their last dose.
#[inline]
pub fn vaccine_efficacy(config: &Config, vaccinated_time: u32) -> f64 {
    if config.vaccination_decay {
        (config.efficiency_pct - EFFICACY_DECAY_PER_DAY * f64::from(vaccinated_time)).max(0.0)
    } else {
        config.efficiency_pct
    }
}

/// Percent chance that one exposure infects `target`.
#[inline]
pub fn infection_pct(pop: &Population, target: AgentId, config: &Config) -> f64 {
    let i = target.index();
    let ratio = pop.covid_age_prob[i] / (pop.us_age_prob[i] + AGE_RATIO_EPSILON);
    (config.covid_spread_chance_pct * ratio).clamp(0.0, 100.0)
}

/// Walk every infectious source in ascending order and expose its
/// susceptible neighbors.
///
/// Agents infected during the step start with timer 0 and so cannot
/// transmit until tomorrow.  Returns the number of reinfections (infections
/// of agents with a prior infection).
pub fn transmission_step(
    pop:     &mut Population,
    network: &ContactNetwork,
    day:     Day,
    config:  &Config,
    rng:     &mut SimRng,
) -> u32 {
    let mut reinfections = 0;

    for source in pop.agent_ids() {
        if !is_infectious(pop, source) {
            continue;
        }
        let s = source.index();
        let past_onset = pop.symptomatic[s]
            && pop.symptomatic_start[s] > 0
            && pop.virus_check_timer[s] > pop.symptomatic_start[s];
        if past_onset && rng.roll_pct(config.precaution_pct) {
            continue;
        }

        for target in network.neighbors(source) {
            let t = target.index();
            if t >= pop.count || pop.infected[t] || pop.immuned[t] || pop.super_immune[t] {
                continue;
            }
            if pop.vaccinated[t] && rng.roll_pct(vaccine_efficacy(config, pop.vaccinated_time[t])) {
                continue;
            }
            if rng.roll_pct(infection_pct(pop, target, config)) {
                if pop.number_of_infection[t] > 0 {
                    reinfections += 1;
                }
                infect(pop, target, day, config, rng);
            }
        }
    }
    reinfections
}
