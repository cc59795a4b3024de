//! Contact network representation and builders.
//!
//! # Data layout
//!
//! Every agent owns a fixed-width row of neighbor slots in one flat array:
//!
//! ```text
//! slots[ agent * stride .. (agent + 1) * stride ]
//! ```
//!
//! Neighbors fill a row from the front; unused slots hold the sentinel
//! `AgentId::INVALID`.  `stride` is the largest degree present after
//! construction (never more than [`MAX_NEIGHBORS`]), so iterating a row is a
//! contiguous scan that stops at the first sentinel.
//!
//! Edges are undirected: `(i, j)` appears in both `i`'s and `j`'s rows.

use abm_core::{AgentId, SimRng};
use log::debug;

/// Hard cap on any agent's degree.
pub const MAX_NEIGHBORS: usize = 50;

/// Attempts allowed per requested edge before the random builder gives up.
const ATTEMPTS_PER_EDGE: usize = 10;

// ── ContactNetwork ────────────────────────────────────────────────────────────

/// Undirected contact graph with padded fixed-width adjacency rows.
///
/// Do not construct directly; use [`ContactNetworkBuilder`] or
/// [`build_random_network`].
pub struct ContactNetwork {
    agent_count: usize,
    stride: usize,
    slots: Vec<AgentId>,
    edge_count: usize,
}

impl ContactNetwork {
    /// A network over `agent_count` agents with no edges.
    pub fn empty(agent_count: usize) -> Self {
        ContactNetworkBuilder::new(agent_count).build()
    }

    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Width of each padded row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The padded row for `agent`, sentinels included.
    #[inline]
    pub fn row(&self, agent: AgentId) -> &[AgentId] {
        let start = agent.index() * self.stride;
        &self.slots[start..start + self.stride]
    }

    /// Valid neighbors of `agent` in insertion order.
    #[inline]
    pub fn neighbors(&self, agent: AgentId) -> impl Iterator<Item = AgentId> + '_ {
        self.row(agent).iter().copied().take_while(|n| n.is_valid())
    }

    #[inline]
    pub fn degree(&self, agent: AgentId) -> usize {
        self.neighbors(agent).count()
    }

    pub fn mean_degree(&self) -> f64 {
        if self.agent_count == 0 {
            return 0.0;
        }
        2.0 * self.edge_count as f64 / self.agent_count as f64
    }

    pub fn has_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.neighbors(a).any(|n| n == b)
    }
}

// ── ContactNetworkBuilder ─────────────────────────────────────────────────────

/// Construct a [`ContactNetwork`] edge by edge, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use abm_core::AgentId;
/// use abm_network::ContactNetworkBuilder;
///
/// let mut b = ContactNetworkBuilder::new(3);
/// assert!(b.add_edge(AgentId(0), AgentId(1)));
/// assert!(!b.add_edge(AgentId(1), AgentId(0))); // already present
/// let net = b.build();
/// assert_eq!(net.edge_count(), 1);
/// assert_eq!(net.degree(AgentId(1)), 1);
/// ```
pub struct ContactNetworkBuilder {
    rows: Vec<Vec<AgentId>>,
    edge_count: usize,
}

impl ContactNetworkBuilder {
    pub fn new(agent_count: usize) -> Self {
        Self { rows: vec![Vec::new(); agent_count], edge_count: 0 }
    }

    pub fn agent_count(&self) -> usize {
        self.rows.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add the undirected edge `(a, b)`.
    ///
    /// Returns `false` and leaves the builder unchanged if `a == b`, either
    /// id is out of range, the edge already exists, or either endpoint is at
    /// [`MAX_NEIGHBORS`].
    pub fn add_edge(&mut self, a: AgentId, b: AgentId) -> bool {
        let n = self.rows.len();
        if a == b || a.index() >= n || b.index() >= n {
            return false;
        }
        if self.rows[a.index()].len() >= MAX_NEIGHBORS || self.rows[b.index()].len() >= MAX_NEIGHBORS {
            return false;
        }
        // Rows are at most MAX_NEIGHBORS long; a linear scan is cheapest.
        if self.rows[a.index()].contains(&b) {
            return false;
        }
        self.rows[a.index()].push(b);
        self.rows[b.index()].push(a);
        self.edge_count += 1;
        true
    }

    /// Consume the builder and lay rows out in the padded flat array.
    pub fn build(self) -> ContactNetwork {
        let agent_count = self.rows.len();
        let stride = self.rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut slots = vec![AgentId::INVALID; agent_count * stride];
        for (i, row) in self.rows.iter().enumerate() {
            slots[i * stride..i * stride + row.len()].copy_from_slice(row);
        }

        ContactNetwork { agent_count, stride, slots, edge_count: self.edge_count }
    }
}

// ── Random construction ───────────────────────────────────────────────────────

/// Build a random network targeting `avg_degree * agent_count / 2` edges.
///
/// Each attempt draws two agent indices uniformly and keeps the pair if
/// [`ContactNetworkBuilder::add_edge`] accepts it.  Construction stops at
/// the target or after `10 × target` attempts, so a crowded or tiny
/// population can end up below the requested mean degree.
pub fn build_random_network(agent_count: usize, avg_degree: u32, rng: &mut SimRng) -> ContactNetwork {
    let mut builder = ContactNetworkBuilder::new(agent_count);
    let target = avg_degree as usize * agent_count / 2;
    let max_attempts = target * ATTEMPTS_PER_EDGE;
    let n = agent_count as u32;

    let mut attempts = 0;
    while builder.edge_count() < target && attempts < max_attempts {
        let i = AgentId(rng.below(n));
        let j = AgentId(rng.below(n));
        builder.add_edge(i, j);
        attempts += 1;
    }

    if builder.edge_count() < target {
        debug!(
            "contact network: {} of {} target edges after {} attempts",
            builder.edge_count(),
            target,
            attempts
        );
    }

    builder.build()
}
