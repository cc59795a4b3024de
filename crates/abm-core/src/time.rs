//! Simulation time model.
//!
//! One tick is one simulated day.  Per-agent timers (`virus_check_timer`,
//! `vaccinated_time`, …) count ticks relative to their own start and are
//! plain `u32`s; `Day` is the absolute day index the driver advances.

use std::fmt;

// ── Day ───────────────────────────────────────────────────────────────────────

/// An absolute simulation day, starting at 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Day(pub u32);

impl Day {
    pub const ZERO: Day = Day(0);

    /// Return the day `n` days after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Day {
        Day(self.0 + n)
    }
}

impl std::ops::Add<u32> for Day {
    type Output = Day;
    #[inline]
    fn add(self, rhs: u32) -> Day {
        Day(self.0 + rhs)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current day and the run's horizon.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// The current day, advanced by `SimClock::advance()` each iteration.
    pub current_day: Day,
    /// Exclusive upper bound: the run stops before reaching this day.
    pub max_days: u32,
}

impl SimClock {
    pub fn new(max_days: u32) -> Self {
        Self { current_day: Day::ZERO, max_days }
    }

    /// Advance the clock by one day.
    #[inline]
    pub fn advance(&mut self) {
        self.current_day = self.current_day + 1;
    }

    /// `true` once every scheduled day has been simulated.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_day.0 >= self.max_days
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.current_day, self.max_days)
    }
}
