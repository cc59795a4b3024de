//! `abm-agent`: Structure-of-Arrays population storage.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                |
//! |--------------------|---------------------------------------------------------|
//! | [`store`]          | `Population` (SoA arrays), `Gender`, `RecoveryGroup`    |
//! | [`builder`]        | `PopulationBuilder` (allocation + demographics)         |
//! | [`demographics`]   | Age/gender/risk draws, super-immune selection           |
//!
//! Every per-agent field is a `pub Vec` indexed by `AgentId::index()`.  The
//! arrays are allocated once and never resize; the disease model mutates
//! them in place through `&mut Population`.

pub mod builder;
pub mod demographics;
pub mod store;


pub use builder::PopulationBuilder;
pub use demographics::{covid_age_prob, us_age_prob};
pub use store::{Gender, Population, RecoveryGroup};
