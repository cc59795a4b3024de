//! The per-run random stream.
//!
//! # Determinism strategy
//!
//! A run owns exactly one root `SimRng`, seeded from the run's seed.  Every
//! stochastic decision in the model draws from it through `&mut SimRng`, in
//! ascending agent-index order within each daily phase, so:
//!
//!   identical seed + identical config + identical draw order
//!     ⇒ identical trajectory
//!
//! Sub-streams (e.g. for network construction) are split off with
//! [`SimRng::child`], which consumes exactly one draw from the parent and
//! mixes in a stream offset:
//!
//!   child_seed = parent.next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio.
//!
//! All percentage rolls follow one convention: `uniform[0,1) * 100 < pct`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic, splittable random stream for one simulation run.
///
/// `SimRng` is `Send` so independent runs can live on different Rayon
/// workers, but a single stream is never shared: every call site takes
/// `&mut SimRng`.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child stream with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    // ── Model draw operations ─────────────────────────────────────────────

    /// A uniform draw scaled to `[0, 100)`.
    #[inline]
    pub fn uniform_pct(&mut self) -> f64 {
        self.random::<f64>() * 100.0
    }

    /// One percentage roll: `true` when a fresh `uniform_pct()` falls below
    /// `pct`.  Always consumes exactly one draw, even for `pct <= 0`.
    #[inline]
    pub fn roll_pct(&mut self, pct: f64) -> bool {
        self.uniform_pct() < pct
    }

    /// Uniform integer in `[0, n)`.  Returns 0 without drawing when `n == 0`.
    #[inline]
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 { 0 } else { self.0.gen_range(0..n) }
    }

    /// One draw from `Normal(mean, sd)`, computed as `mean + sd * z`.
    ///
    /// Accepts any `sd` (including 0) so callers never deal with a
    /// construction error for degenerate configs.
    #[inline]
    pub fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        let z: f64 = self.0.sample(StandardNormal);
        mean + sd * z
    }

    /// Pick an index with probability proportional to `weights`.
    ///
    /// Consumes one uniform draw scaled by the weight total and walks the
    /// cumulative sum.  Returns `None` without drawing if the weights are
    /// empty or sum to a non-positive value.
    pub fn categorical(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 || !total.is_finite() {
            return None;
        }
        let r = self.random::<f64>() * total;
        let mut acc = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            acc += w;
            if r < acc {
                return Some(i);
            }
        }
        Some(weights.len() - 1)
    }

    /// Draw `amount` distinct elements of `pool` without replacement.
    ///
    /// `amount` is clamped to `pool.len()`.  The returned order is the
    /// sampler's order, which is deterministic for a given stream state.
    pub fn sample_without_replacement<T: Copy>(&mut self, pool: &[T], amount: usize) -> Vec<T> {
        let amount = amount.min(pool.len());
        if amount == 0 {
            return Vec::new();
        }
        rand::seq::index::sample(&mut self.0, pool.len(), amount)
            .into_iter()
            .map(|i| pool[i])
            .collect()
    }
}
