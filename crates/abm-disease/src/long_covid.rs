//! Long-COVID onset, recovery-group assignment, and Weibull recovery.
//!
//! # Recovery groups
//!
//! | Group        | Weibull k | Weibull λ (days) | Severity at onset |
//! |--------------|-----------|------------------|-------------------|
//! | `Fast`       | 1.5       | 60               | N(30, 15)         |
//! | `Gradual`    | 1.2       | 450              | N(50, 20)         |
//! | `Persistent` | 0.5       | 1200             | N(70, 20)         |
//!
//! Severity is clipped to `[5, 100]` at onset.  An LC-active agent recovers
//! on a single successful daily roll against the group-adjusted Weibull
//! hazard; recovery clears every LC field at once.

use abm_agent::{Gender, Population, RecoveryGroup};
use abm_core::{AgentId, Config, Day, SimRng};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEVERITY_MIN: f64 = 5.0;
const SEVERITY_MAX: f64 = 100.0;

/// Severity cap applied when an LC-active agent is reinfected.
const REINFECTION_SEVERITY_CAP: f64 = 90.0;
const REINFECTION_SEVERITY_BUMP: f64 = 10.0;

/// Escalation chances (percent) on reinfection while LC-active.
const ESCALATE_FAST_PCT: f64 = 30.0;
const ESCALATE_GRADUAL_PCT: f64 = 20.0;

const VACCINATED_ONSET_MULT: f64 = 0.7;

/// Gradual-group weight moved to persistent for older agents and long courses.
const ELDERLY_PERSISTENT_SHIFT: f64 = 2.0;
const LONG_COURSE_PERSISTENT_SHIFT: f64 = 4.0;
const LONG_COURSE_DAYS: u32 = 21;

const RECOVERY_PCT_MIN: f64 = 0.01;
const RECOVERY_PCT_MAX: f64 = 10.0;
const ADJUSTED_RECOVERY_PCT_MAX: f64 = 15.0;
/// Persistent cases this far past onset (about three years) recover at a
/// tenth of the usual rate.
const PERSISTENT_LATE_DAYS: u32 = 1095;

/// Gradual cases past this many days lose a little severity on every day
/// they fail to recover.
const GRADUAL_IMPROVEMENT_DAYS: u32 = 30;
const GRADUAL_DAILY_IMPROVEMENT: f64 = 0.05;

// ── Group parameters ──────────────────────────────────────────────────────────

/// Weibull `(k, λ)` for a recovery group.
pub fn weibull_params(group: RecoveryGroup) -> (f64, f64) {
    match group {
        RecoveryGroup::Fast       => (1.5, 60.0),
        RecoveryGroup::Gradual    => (1.2, 450.0),
        RecoveryGroup::Persistent => (0.5, 1200.0),
    }
}

/// `(mean, sd)` of the onset severity for a recovery group.
pub fn severity_distribution(group: RecoveryGroup) -> (f64, f64) {
    match group {
        RecoveryGroup::Fast       => (30.0, 15.0),
        RecoveryGroup::Gradual    => (50.0, 20.0),
        RecoveryGroup::Persistent => (70.0, 20.0),
    }
}

// ── Onset ─────────────────────────────────────────────────────────────────────

/// Percent chance that an infection which just ended (or whose symptoms
/// just ended) turns into Long COVID.  Pure; draws nothing.
pub fn onset_probability(pop: &Population, agent: AgentId, config: &Config, asymptomatic: bool) -> f64 {
    let i = agent.index();
    let mut p = config.lc_onset_base_pct;

    p *= match pop.age[i] {
        0..=29  => 0.9,
        30..=49 => 1.0,
        50..=64 => 1.2,
        _       => 1.3,
    };
    if pop.gender[i] == Gender::Female {
        p *= config.lc_incidence_mult_female;
    }
    if pop.vaccinated[i] {
        p *= VACCINATED_ONSET_MULT;
    }
    if pop.number_of_infection[i] > 1 && pop.long_covid_recovery_group[i] < 0 {
        p *= config.reinfection_new_onset_mult;
    }
    if asymptomatic {
        p *= config.asymptomatic_lc_mult;
    }
    p.clamp(0.0, 100.0)
}

/// Make `agent` LC-active: draw a recovery group and an onset severity.
///
/// Consumes one uniform draw for the group and one normal for severity.
pub fn assign_group(pop: &mut Population, agent: AgentId, config: &Config, rng: &mut SimRng) {
    let i = agent.index();
    let mut fast = config.lc_base_fast_prob.max(0.0);
    let mut persistent = config.lc_base_persistent_prob.max(0.0);
    let base_total = fast + persistent;
    if base_total > 100.0 {
        fast *= 100.0 / base_total;
        persistent *= 100.0 / base_total;
    }
    let mut gradual = (100.0 - fast - persistent).max(0.0);

    if pop.age[i] >= 65 && gradual >= ELDERLY_PERSISTENT_SHIFT {
        persistent += ELDERLY_PERSISTENT_SHIFT;
        gradual -= ELDERLY_PERSISTENT_SHIFT;
    }
    if pop.symptomatic_duration[i] > LONG_COURSE_DAYS && gradual >= LONG_COURSE_PERSISTENT_SHIFT {
        persistent += LONG_COURSE_PERSISTENT_SHIFT;
        gradual -= LONG_COURSE_PERSISTENT_SHIFT;
    }
    if fast + persistent + gradual <= 0.0 {
        gradual = 100.0;
    }

    let group = match rng.categorical(&[fast, persistent, gradual]) {
        Some(0) => RecoveryGroup::Fast,
        Some(1) => RecoveryGroup::Persistent,
        _       => RecoveryGroup::Gradual,
    };
    let (mean, sd) = severity_distribution(group);
    let severity = rng.normal(mean, sd).clamp(SEVERITY_MIN, SEVERITY_MAX);

    pop.start_long_covid(agent, group, weibull_params(group), severity);
}

/// Activate every deferred onset whose day has come.
///
/// An agent that became LC-active through another pathway in the meantime
/// only has its pending flag cleared.
pub fn activate_pending(pop: &mut Population, day: Day, config: &Config, rng: &mut SimRng) {
    for i in 0..pop.count {
        if !pop.lc_pending[i] || day.0 < pop.lc_onset_day[i] {
            continue;
        }
        pop.lc_pending[i] = false;
        let agent = AgentId(i as u32);
        if !pop.is_lc_active(agent) {
            assign_group(pop, agent, config, rng);
        }
    }
}

/// Reinfection of an LC-active agent: raise its severity and maybe move it
/// one group toward `Persistent`.  Always consumes exactly one draw.
pub(crate) fn worsen_on_reinfection(pop: &mut Population, agent: AgentId, rng: &mut SimRng) {
    let i = agent.index();
    pop.long_covid_severity[i] =
        (pop.long_covid_severity[i] + REINFECTION_SEVERITY_BUMP).clamp(SEVERITY_MIN, REINFECTION_SEVERITY_CAP);

    let roll = rng.uniform_pct();
    let next = match pop.recovery_group(agent) {
        Some(RecoveryGroup::Fast) if roll < ESCALATE_FAST_PCT => RecoveryGroup::Gradual,
        Some(RecoveryGroup::Gradual) if roll < ESCALATE_GRADUAL_PCT => RecoveryGroup::Persistent,
        _ => return,
    };
    let (k, lambda) = weibull_params(next);
    pop.long_covid_recovery_group[i] = next.code();
    pop.long_covid_weibull_k[i] = k;
    pop.long_covid_weibull_lambda[i] = lambda;
}

// ── Recovery ──────────────────────────────────────────────────────────────────

/// Daily recovery chance in percent for an LC case `duration` days past
/// onset, after the group adjustment.
pub fn daily_recovery_pct(group: Option<RecoveryGroup>, duration: u32, k: f64, lambda: f64) -> f64 {
    let t = f64::from(duration);
    let hazard = (k / lambda) * (t / lambda).powf(k - 1.0);
    let mut pct = ((1.0 - (-hazard).exp()) * 100.0).clamp(RECOVERY_PCT_MIN, RECOVERY_PCT_MAX);

    match group {
        Some(RecoveryGroup::Fast) => pct *= 2.0,
        Some(RecoveryGroup::Persistent) => {
            pct *= 0.3;
            if duration > PERSISTENT_LATE_DAYS {
                pct *= 0.1;
            }
        }
        _ => {}
    }
    pct.clamp(0.0, ADJUSTED_RECOVERY_PCT_MAX)
}

/// Age every LC-active agent by one day and roll for recovery.
///
/// Returns the number of agents that recovered.
pub fn recovery_pass(pop: &mut Population, rng: &mut SimRng) -> usize {
    let mut recovered = 0;
    for i in 0..pop.count {
        if !pop.persistent_long_covid[i] {
            continue;
        }
        let agent = AgentId(i as u32);
        pop.long_covid_duration[i] += 1;

        let duration = pop.long_covid_duration[i];
        let k = pop.long_covid_weibull_k[i];
        let lambda = pop.long_covid_weibull_lambda[i];
        if k <= 0.0 || lambda <= 0.0 {
            continue;
        }

        let group = pop.recovery_group(agent);
        if rng.roll_pct(daily_recovery_pct(group, duration, k, lambda)) {
            pop.clear_long_covid(agent);
            recovered += 1;
        } else if group == Some(RecoveryGroup::Gradual) && duration > GRADUAL_IMPROVEMENT_DAYS {
            pop.long_covid_severity[i] = (pop.long_covid_severity[i] - GRADUAL_DAILY_IMPROVEMENT).max(SEVERITY_MIN);
        }
    }
    recovered
}
