//! `abm-core`: foundational types for the Long-COVID epidemic ABM.
//!
//! This crate is a dependency of every other `abm-*` crate.  It has no
//! `abm-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`time`]        | `Day`, `SimClock`                                     |
//! | [`rng`]         | `SimRng` (one ordered stream per run)                 |
//! | [`config`]      | `Config` (all run tunables, with defaults)            |
//! | [`error`]       | `AbmError`, `AbmResult`                               |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::Config;
pub use error::{AbmError, AbmResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::{Day, SimClock};
