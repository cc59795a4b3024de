//! `abm-disease`: the per-agent epidemic sub-models.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                   |
//! |--------------------|------------------------------------------------------------|
//! | [`infection`]      | `infect`, initial seeding, daily infected/immune updates   |
//! | [`long_covid`]     | Onset probability, group assignment, Weibull recovery      |
//! | [`transmission`]   | Daily network walk from infectious sources                 |
//! | [`vaccination`]    | One-shot rollout, daily aging and boosters                 |
//! | [`productivity`]   | Population welfare metric                                  |
//!
//! # Conventions
//!
//! Every sub-model is a free function over `&mut Population` that takes the
//! run's `&Config` and `&mut SimRng` explicitly.  Agents are always visited
//! in ascending index order, and every random decision is one draw from the
//! shared stream, so the call order in `abm-sim` fixes the full trajectory.

pub mod infection;
pub mod long_covid;
pub mod productivity;
pub mod transmission;
pub mod vaccination;

#[cfg(test)]
mod tests;

pub use infection::{infect, seed_initial_infections, update_immune, update_infected};
pub use long_covid::{activate_pending, assign_group, onset_probability, recovery_pass};
pub use productivity::productivity;
pub use transmission::transmission_step;
pub use vaccination::{age_and_boost, rollout};
