//! Demographic initialization.
//!
//! Draw order (one stream, ascending agent index within each step):
//!
//! 1. age:        `N` integer draws in `[0, age_range)`
//! 2. gender:     `N` Bernoulli draws, male with `male_population_pct / 100`
//! 3. risk bands: table lookups, no draws
//! 4. super-immune: one sample of `floor(super_immune_pct * N / 100)`
//!    indices without replacement
//! 5. health-risk level: `N` categorical draws

use abm_core::{AgentId, Config, SimRng};
use log::debug;

use crate::{Gender, Population};

/// Upper age-band bounds (exclusive) and the share of observed COVID cases
/// in each band.  Ages past the last bound fall into `COVID_AGE_DEFAULT`.
const COVID_AGE_BANDS: [(u8, f64); 8] = [
    (10, 2.3),
    (20, 5.1),
    (30, 15.5),
    (40, 16.9),
    (50, 16.4),
    (60, 16.4),
    (70, 11.9),
    (80, 7.0),
];
const COVID_AGE_DEFAULT: f64 = 8.5;

/// Upper age-band bounds (exclusive) and the share of the US population.
const US_AGE_BANDS: [(u8, f64); 9] = [
    (5, 5.7),
    (15, 12.5),
    (25, 13.0),
    (35, 13.7),
    (45, 13.1),
    (55, 12.3),
    (65, 12.9),
    (75, 10.1),
    (85, 4.9),
];
const US_AGE_DEFAULT: f64 = 1.8;

fn band_lookup(bands: &[(u8, f64)], default: f64, age: u8) -> f64 {
    bands
        .iter()
        .find(|&&(upper, _)| age < upper)
        .map_or(default, |&(_, value)| value)
}

/// Share of observed COVID cases in the age band containing `age`.
pub fn covid_age_prob(age: u8) -> f64 {
    band_lookup(&COVID_AGE_BANDS, COVID_AGE_DEFAULT, age)
}

/// Share of the US population in the age band containing `age`.
pub fn us_age_prob(age: u8) -> f64 {
    band_lookup(&US_AGE_BANDS, US_AGE_DEFAULT, age)
}

/// Assign age, gender, risk weights, super-immune status, and health-risk
/// level to every agent.
pub fn assign_demographics(pop: &mut Population, config: &Config, rng: &mut SimRng) {
    let n = pop.count;
    // Ages are stored as u8.
    let age_range = config.age_range.min(u32::from(u8::MAX) + 1);

    for i in 0..n {
        pop.age[i] = rng.below(age_range) as u8;
    }

    let male_p = config.male_population_pct / 100.0;
    for i in 0..n {
        pop.gender[i] = if rng.gen_bool(male_p) { Gender::Male } else { Gender::Female };
    }

    for i in 0..n {
        pop.covid_age_prob[i] = covid_age_prob(pop.age[i]);
        pop.us_age_prob[i] = us_age_prob(pop.age[i]);
    }

    let n_super = (config.super_immune_pct.max(0.0) * n as f64 / 100.0).floor() as usize;
    let all: Vec<AgentId> = pop.agent_ids().collect();
    for agent in rng.sample_without_replacement(&all, n_super) {
        pop.super_immune[agent.index()] = true;
    }
    debug!("demographics: {n_super} of {n} agents super-immune");

    assign_health_risk(pop, config, rng);
}

/// Categorical draw over risk levels 2–4; the remaining mass is level 1.
fn assign_health_risk(pop: &mut Population, config: &Config, rng: &mut SimRng) {
    let l2 = config.risk_level_2_pct.max(0.0);
    let l3 = config.risk_level_3_pct.max(0.0);
    let l4 = config.risk_level_4_pct.max(0.0);
    let l1 = (100.0 - (l2 + l3 + l4)).max(0.0);
    let weights = [l1, l2, l3, l4];

    for i in 0..pop.count {
        pop.health_risk_level[i] = match rng.categorical(&weights) {
            Some(level) => level as u8 + 1,
            None => 1,
        };
    }
}
