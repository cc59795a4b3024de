//! Run configuration.
//!
//! `Config` is immutable once a run starts.  Every tunable of the model is a
//! named field with a documented default; there is no free-form parameter
//! map.  Overrides arrive either as `(name, f64)` pairs from a parameter
//! sweep or as a JSON object, and both paths reject unknown names.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::{AbmError, AbmResult};

/// All tunables of one simulation run.
///
/// Percentages are on the 0–100 scale.  Durations are in days.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // ── Run horizon and seeding ───────────────────────────────────────────
    /// Days to simulate unless the epidemic dies out first.
    pub max_days: u32,
    /// Agents infected on day 0 (clamped to eligible agents).
    pub initial_infected_agents: u32,

    // ── Contact network ───────────────────────────────────────────────────
    /// Requested mean degree; the builder may fall short.
    pub avg_degree: u32,

    // ── Transmission ──────────────────────────────────────────────────────
    pub covid_spread_chance_pct: f64,
    /// Chance a symptomatic source stays home for the day.
    pub precaution_pct: f64,

    // ── Infection course ──────────────────────────────────────────────────
    pub infected_period: u32,
    /// Upper bound (exclusive) of the random part of the contagious window.
    pub active_duration: u32,
    pub immune_period: u32,
    pub incubation_period: u32,
    pub symptomatic_duration_min: f64,
    pub symptomatic_duration_mid: f64,
    pub symptomatic_duration_max: f64,
    pub symptomatic_duration_dev: f64,
    pub asymptomatic_pct: f64,
    /// Extra symptomatic days per lifetime infection.
    pub effect_of_reinfection: u32,
    pub super_immune_pct: f64,

    // ── Long COVID ────────────────────────────────────────────────────────
    pub long_covid: bool,
    pub long_covid_time_threshold: u32,
    pub asymptomatic_lc_mult: f64,
    pub lc_incidence_mult_female: f64,
    pub lc_base_fast_prob: f64,
    pub lc_base_persistent_prob: f64,
    pub reinfection_new_onset_mult: f64,
    pub lc_onset_base_pct: f64,

    // ── Vaccination ───────────────────────────────────────────────────────
    /// Day on which the one-shot rollout happens.
    pub v_start_time: u32,
    pub vaccination_pct: f64,
    pub efficiency_pct: f64,
    pub boosted_pct: f64,
    /// Linear efficacy decay of 0.11 points per day since the last dose.
    pub vaccination_decay: bool,

    // ── Demographics ──────────────────────────────────────────────────────
    pub male_population_pct: f64,
    /// Ages are drawn from `[0, age_range)`.
    pub age_range: u32,
    pub risk_level_2_pct: f64,
    pub risk_level_3_pct: f64,
    pub risk_level_4_pct: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_days:                   365,
            initial_infected_agents:    5,
            avg_degree:                 5,
            covid_spread_chance_pct:    10.0,
            precaution_pct:             50.0,
            infected_period:            10,
            active_duration:            7,
            immune_period:              21,
            incubation_period:          4,
            symptomatic_duration_min:   1.0,
            symptomatic_duration_mid:   10.0,
            symptomatic_duration_max:   60.0,
            symptomatic_duration_dev:   8.0,
            asymptomatic_pct:           40.0,
            effect_of_reinfection:      3,
            super_immune_pct:           4.0,
            long_covid:                 true,
            long_covid_time_threshold:  30,
            asymptomatic_lc_mult:       0.50,
            lc_incidence_mult_female:   1.20,
            lc_base_fast_prob:          9.0,
            lc_base_persistent_prob:    7.0,
            reinfection_new_onset_mult: 0.70,
            lc_onset_base_pct:          15.0,
            v_start_time:               180,
            vaccination_pct:            80.0,
            efficiency_pct:             80.0,
            boosted_pct:                30.0,
            vaccination_decay:          true,
            male_population_pct:        49.5,
            age_range:                  100,
            risk_level_2_pct:           4.0,
            risk_level_3_pct:           40.0,
            risk_level_4_pct:           6.0,
        }
    }
}

impl Config {
    /// Parse a JSON object.  Missing fields take their defaults; unknown
    /// fields are an error.
    pub fn from_json_str(json: &str) -> AbmResult<Self> {
        let config: Config = serde_json::from_str(json).map_err(|e| {
            // serde reports unknown fields as a generic data error; surface
            // them with the dedicated variant.
            match unknown_field_name(&e.to_string()) {
                Some(name) => AbmError::UnknownParameter(name),
                None => AbmError::Parse(e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a sequence of numeric overrides, as produced by a parameter
    /// sweep.
    pub fn with_overrides<I, K>(mut self, overrides: I) -> AbmResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        for (name, value) in overrides {
            self.set(name.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Set one parameter by name from a numeric value.
    ///
    /// Integer fields truncate toward zero and reject negatives.  Boolean
    /// fields read any non-zero value as `true`.
    pub fn set(&mut self, name: &str, value: f64) -> AbmResult<()> {
        let invalid = || AbmError::InvalidParameter { name: name.to_owned(), value };
        if !value.is_finite() {
            return Err(invalid());
        }

        let Value::Object(mut fields) = serde_json::to_value(&*self)? else {
            return Err(AbmError::Config("config did not serialize to an object".into()));
        };
        let slot = fields
            .get_mut(name)
            .ok_or_else(|| AbmError::UnknownParameter(name.to_owned()))?;

        *slot = match &*slot {
            Value::Bool(_) => Value::Bool(value != 0.0),
            Value::Number(n) if n.is_u64() => {
                if value < 0.0 || value.trunc() > f64::from(u32::MAX) {
                    return Err(invalid());
                }
                Value::Number(Number::from(value.trunc() as u64))
            }
            Value::Number(_) => Value::Number(Number::from_f64(value).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };

        let updated: Config = serde_json::from_value(Value::Object(fields))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject configurations no clamping can make sense of.
    pub fn validate(&self) -> AbmResult<()> {
        let floats = [
            ("covid_spread_chance_pct", self.covid_spread_chance_pct),
            ("precaution_pct", self.precaution_pct),
            ("symptomatic_duration_min", self.symptomatic_duration_min),
            ("symptomatic_duration_mid", self.symptomatic_duration_mid),
            ("symptomatic_duration_max", self.symptomatic_duration_max),
            ("symptomatic_duration_dev", self.symptomatic_duration_dev),
            ("asymptomatic_pct", self.asymptomatic_pct),
            ("super_immune_pct", self.super_immune_pct),
            ("asymptomatic_lc_mult", self.asymptomatic_lc_mult),
            ("lc_incidence_mult_female", self.lc_incidence_mult_female),
            ("lc_base_fast_prob", self.lc_base_fast_prob),
            ("lc_base_persistent_prob", self.lc_base_persistent_prob),
            ("reinfection_new_onset_mult", self.reinfection_new_onset_mult),
            ("lc_onset_base_pct", self.lc_onset_base_pct),
            ("vaccination_pct", self.vaccination_pct),
            ("efficiency_pct", self.efficiency_pct),
            ("boosted_pct", self.boosted_pct),
            ("male_population_pct", self.male_population_pct),
            ("risk_level_2_pct", self.risk_level_2_pct),
            ("risk_level_3_pct", self.risk_level_3_pct),
            ("risk_level_4_pct", self.risk_level_4_pct),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AbmError::InvalidParameter { name: (*name).to_owned(), value: *value });
        }
        if self.symptomatic_duration_min > self.symptomatic_duration_max {
            return Err(AbmError::Config(format!(
                "symptomatic_duration_min ({}) exceeds symptomatic_duration_max ({})",
                self.symptomatic_duration_min, self.symptomatic_duration_max
            )));
        }
        Ok(())
    }

    // ── Derived quantities ────────────────────────────────────────────────

    /// Longest allowed contagious window: `max(1, infected_period − 1)`.
    #[inline]
    pub fn max_contagious_days(&self) -> u32 {
        self.infected_period.saturating_sub(1).max(1)
    }

    /// Timer value at which an immune agent becomes susceptible again.
    /// Saturates at `u32::MAX`, which means immunity never wanes.
    #[inline]
    pub fn immunity_end(&self) -> u32 {
        self.infected_period.saturating_add(self.immune_period)
    }
}

/// Extract `name` from serde's "unknown field `name`, expected …" message.
fn unknown_field_name(msg: &str) -> Option<String> {
    let rest = msg.strip_prefix("unknown field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_owned())
}
