//! Core agent storage: `Population` (SoA data).
//!
//! One `Population` exists per run and is exclusively owned by the run's
//! `Sim`.  Components receive `&mut Population` explicitly; there is no
//! global state.
//!
//! ```ignore
//! let infected = pop.infected[agent.index()];  // O(1), cache-friendly
//! ```

use abm_core::AgentId;

// ── Small per-agent enums ─────────────────────────────────────────────────────

/// Binary sex used for the Long-COVID incidence multiplier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Gender {
    #[default]
    Female,
    Male,
}

/// Latent Long-COVID recovery class.
///
/// Stored in the SoA as an `i8` code (`-1` = none) so the "no group" state
/// is a plain array value; this enum is the typed view of the active codes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RecoveryGroup {
    Fast,
    Gradual,
    Persistent,
}

impl RecoveryGroup {
    /// Code stored in `Population::long_covid_recovery_group` when inactive.
    pub const NONE_CODE: i8 = -1;

    #[inline]
    pub fn code(self) -> i8 {
        match self {
            RecoveryGroup::Fast       => 0,
            RecoveryGroup::Gradual    => 1,
            RecoveryGroup::Persistent => 2,
        }
    }

    #[inline]
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(RecoveryGroup::Fast),
            1 => Some(RecoveryGroup::Gradual),
            2 => Some(RecoveryGroup::Persistent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecoveryGroup::Fast       => "fast",
            RecoveryGroup::Gradual    => "gradual",
            RecoveryGroup::Persistent => "persistent",
        }
    }
}

impl std::fmt::Display for RecoveryGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them.  Timers count days relative to the event that
/// started them.
pub struct Population {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Demographics (fixed at creation) ──────────────────────────────────
    pub age: Vec<u8>,
    pub gender: Vec<Gender>,
    /// 1 (baseline) to 4.
    pub health_risk_level: Vec<u8>,
    /// Share of observed cases in the agent's age band.
    pub covid_age_prob: Vec<f64>,
    /// Share of the US population in the agent's age band.
    pub us_age_prob: Vec<f64>,

    // ── Epidemic status ───────────────────────────────────────────────────
    pub infected: Vec<bool>,
    /// Post-infection immunity.  Never `true` together with `infected`.
    pub immuned: Vec<bool>,
    pub symptomatic: Vec<bool>,
    /// Permanently excluded from infection.  Set once at initialization.
    pub super_immune: Vec<bool>,

    // ── Infection timers ──────────────────────────────────────────────────
    /// Lifetime infection count.
    pub number_of_infection: Vec<u32>,
    pub infection_start_tick: Vec<u32>,
    /// Days since the current infected/immune state began.
    pub virus_check_timer: Vec<u32>,
    /// Infectious window `[infectious_start, infectious_end)` in timer days.
    pub infectious_start: Vec<u32>,
    pub infectious_end: Vec<u32>,
    pub transfer_active_duration: Vec<u32>,

    // ── Symptom timers ────────────────────────────────────────────────────
    /// Timer day symptoms begin; 0 means an asymptomatic course.
    pub symptomatic_start: Vec<u32>,
    pub symptomatic_duration: Vec<u32>,

    // ── Long COVID ────────────────────────────────────────────────────────
    pub persistent_long_covid: Vec<bool>,
    /// In `[5, 100]` while active, 0 otherwise.
    pub long_covid_severity: Vec<f64>,
    /// Days since onset.
    pub long_covid_duration: Vec<u32>,
    /// `RecoveryGroup::code()` or `RecoveryGroup::NONE_CODE`.
    pub long_covid_recovery_group: Vec<i8>,
    pub long_covid_weibull_k: Vec<f64>,
    pub long_covid_weibull_lambda: Vec<f64>,
    pub lc_pending: Vec<bool>,
    pub lc_onset_day: Vec<u32>,

    // ── Vaccination ───────────────────────────────────────────────────────
    pub vaccinated: Vec<bool>,
    /// Days since the last dose or booster.
    pub vaccinated_time: Vec<u32>,
}

impl Population {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    // ── Long-COVID helpers ────────────────────────────────────────────────

    #[inline]
    pub fn is_lc_active(&self, agent: AgentId) -> bool {
        self.persistent_long_covid[agent.index()]
    }

    /// Typed recovery group, `None` while LC is inactive.
    #[inline]
    pub fn recovery_group(&self, agent: AgentId) -> Option<RecoveryGroup> {
        RecoveryGroup::from_code(self.long_covid_recovery_group[agent.index()])
    }

    /// Mark LC active with the given group, hazard shape and severity, and
    /// restart the episode clock.
    pub fn start_long_covid(
        &mut self,
        agent:    AgentId,
        group:    RecoveryGroup,
        (k, lambda): (f64, f64),
        severity: f64,
    ) {
        let i = agent.index();
        self.persistent_long_covid[i]     = true;
        self.long_covid_duration[i]       = 0;
        self.long_covid_recovery_group[i] = group.code();
        self.long_covid_weibull_k[i]      = k;
        self.long_covid_weibull_lambda[i] = lambda;
        self.long_covid_severity[i]       = severity;
    }

    /// Clear every LC field back to the inactive state.
    pub fn clear_long_covid(&mut self, agent: AgentId) {
        let i = agent.index();
        self.persistent_long_covid[i]     = false;
        self.long_covid_severity[i]       = 0.0;
        self.long_covid_duration[i]       = 0;
        self.long_covid_recovery_group[i] = RecoveryGroup::NONE_CODE;
        self.long_covid_weibull_k[i]      = 0.0;
        self.long_covid_weibull_lambda[i] = 0.0;
    }

    // ── Aggregate counts ──────────────────────────────────────────────────

    pub fn count_infected(&self) -> usize {
        self.infected.iter().filter(|&&b| b).count()
    }

    pub fn count_immune(&self) -> usize {
        self.immuned.iter().filter(|&&b| b).count()
    }

    pub fn count_symptomatic(&self) -> usize {
        self.symptomatic.iter().filter(|&&b| b).count()
    }

    pub fn count_long_covid(&self) -> usize {
        self.persistent_long_covid.iter().filter(|&&b| b).count()
    }

    pub fn count_vaccinated(&self) -> usize {
        self.vaccinated.iter().filter(|&&b| b).count()
    }

    /// Agents with at least one lifetime infection.
    pub fn count_ever_infected(&self) -> usize {
        self.number_of_infection.iter().filter(|&&n| n > 0).count()
    }

    /// `true` while any agent is infected or immune.
    pub fn epidemic_active(&self) -> bool {
        self.infected.iter().any(|&b| b) || self.immuned.iter().any(|&b| b)
    }

    // ── Package-private constructor used by PopulationBuilder ─────────────

    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,

            age:               vec![0; count],
            gender:            vec![Gender::default(); count],
            health_risk_level: vec![1; count],
            covid_age_prob:    vec![15.0; count],
            us_age_prob:       vec![13.0; count],

            infected:     vec![false; count],
            immuned:      vec![false; count],
            symptomatic:  vec![false; count],
            super_immune: vec![false; count],

            number_of_infection:      vec![0; count],
            infection_start_tick:     vec![0; count],
            virus_check_timer:        vec![0; count],
            infectious_start:         vec![1; count],
            infectious_end:           vec![1; count],
            transfer_active_duration: vec![0; count],

            symptomatic_start:    vec![0; count],
            symptomatic_duration: vec![0; count],

            persistent_long_covid:     vec![false; count],
            long_covid_severity:       vec![0.0; count],
            long_covid_duration:       vec![0; count],
            long_covid_recovery_group: vec![RecoveryGroup::NONE_CODE; count],
            long_covid_weibull_k:      vec![0.0; count],
            long_covid_weibull_lambda: vec![0.0; count],
            lc_pending:                vec![false; count],
            lc_onset_day:              vec![0; count],

            vaccinated:      vec![false; count],
            vaccinated_time: vec![0; count],
        }
    }
}
