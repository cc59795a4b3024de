//! `abm-network`: static undirected contact network.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`network`] | `ContactNetwork` (padded rows), `ContactNetworkBuilder`,     |
//! |             | `build_random_network`                                       |
//!
//! The network is built once per run and is immutable afterwards.

pub mod network;


pub use network::{ContactNetwork, ContactNetworkBuilder, MAX_NEIGHBORS, build_random_network};
