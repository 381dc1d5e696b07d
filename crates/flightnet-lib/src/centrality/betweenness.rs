//! Betweenness centrality over time-weighted shortest paths.
//!
//! # Definition
//!
//! ```text
//! C_B(v) = Σ_{s≠v≠t} σ_st(v) / σ_st
//! ```
//!
//! where σ_st counts shortest s→t paths and σ_st(v) those passing through v.
//!
//! # Brandes' Algorithm (2001), weighted
//!
//! 1. Run Dijkstra from each source s, counting shortest paths σ_sv and
//!    recording shortest-path predecessors P_s(v). Two paths are "equally
//!    short" only when their summed flight times compare exactly equal.
//! 2. Walk the settle order backwards accumulating dependencies:
//!
//! ```text
//! δ_s(v) = Σ_{w: v∈P_s(w)} (σ_sv/σ_sw) × (1 + δ_s(w))
//! ```
//!
//! # Normalization
//!
//! Directed graphs divide by (n-1)(n-2), applied only when n > 2.
//!
//! Sources are processed in fixed-size chunks on the rayon pool; chunk sums
//! are merged in chunk order so the result does not depend on scheduling.

use std::collections::BinaryHeap;

use rayon::prelude::*;

use crate::network::{Network, NodeIndex};
use crate::path::{CostType, QueueEntry};

/// Number of sources accumulated per parallel task.
const SOURCE_CHUNK: usize = 64;

/// Betweenness for every node, in node order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(network: &Network, normalized: bool) -> Vec<f64> {
    let n = network.node_count();
    if n < 3 {
        return vec![0.0; n];
    }

    let sources: Vec<NodeIndex> = (0..n).collect();
    let partials: Vec<Vec<f64>> = sources
        .par_chunks(SOURCE_CHUNK)
        .map(|chunk| {
            let mut acc = vec![0.0_f64; n];
            for &source in chunk {
                accumulate_source(network, source, &mut acc);
            }
            acc
        })
        .collect();

    let mut betweenness = vec![0.0_f64; n];
    for partial in partials {
        for (total, value) in betweenness.iter_mut().zip(partial) {
            *total += value;
        }
    }

    if normalized {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for value in &mut betweenness {
            *value *= scale;
        }
    }

    betweenness
}

/// Add the dependencies of `source` on every other node into `acc`.
fn accumulate_source(network: &Network, source: NodeIndex, acc: &mut [f64]) {
    let tree = ShortestPathDag::from_source(network, source);
    let mut delta = vec![0.0_f64; acc.len()];

    // Process nodes farthest first.
    for &w in tree.order.iter().rev() {
        for &v in &tree.predecessors[w] {
            let coeff = tree.sigma[v] / tree.sigma[w];
            delta[v] += coeff * (1.0 + delta[w]);
        }
        if w != source {
            acc[w] += delta[w];
        }
    }
}

/// Shortest-path DAG rooted at one source.
struct ShortestPathDag {
    /// Nodes in the order Dijkstra settled them.
    order: Vec<NodeIndex>,
    /// Number of shortest paths from the source.
    sigma: Vec<f64>,
    /// Predecessors on shortest paths.
    predecessors: Vec<Vec<NodeIndex>>,
}

impl ShortestPathDag {
    fn from_source(network: &Network, source: NodeIndex) -> Self {
        let n = network.node_count();
        let mut distances = vec![f64::INFINITY; n];
        let mut settled = vec![false; n];
        let mut sigma = vec![0.0_f64; n];
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
        let mut order = Vec::new();
        let mut queue = BinaryHeap::new();

        distances[source] = 0.0;
        sigma[source] = 1.0;
        queue.push(QueueEntry::new(source, 0.0));

        while let Some(entry) = queue.pop() {
            let v = entry.node;
            if settled[v] {
                continue;
            }
            settled[v] = true;
            order.push(v);

            for edge in network.outgoing(v) {
                let w = edge.node;
                if settled[w] {
                    continue;
                }
                let candidate = distances[v] + network.route(edge.route).weight(CostType::Time);
                if candidate < distances[w] {
                    distances[w] = candidate;
                    sigma[w] = sigma[v];
                    predecessors[w].clear();
                    predecessors[w].push(v);
                    queue.push(QueueEntry::new(w, candidate));
                } else if candidate == distances[w] {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        Self {
            order,
            sigma,
            predecessors,
        }
    }
}
