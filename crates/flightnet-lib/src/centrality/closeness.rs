//! Closeness centrality over time-weighted distances.
//!
//! # Definition (Wasserman-Faust)
//!
//! For a node v that reaches r - 1 other nodes with summed flight time D:
//!
//! ```text
//! C(v) = (r - 1) / D                      (plain)
//! C(v) = (r - 1) / D × (r - 1) / (n - 1)  (wf_improved)
//! ```
//!
//! The scaling keeps scores comparable on a disconnected network. Nodes that
//! reach nothing, or only reach nodes at zero distance, score 0.
//!
//! Distances are measured outward, from v to the nodes it can reach.

use std::collections::BinaryHeap;

use rayon::prelude::*;

use crate::network::{Network, NodeIndex};
use crate::path::{CostType, QueueEntry};

/// Closeness for every node, in node order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(network: &Network, wf_improved: bool) -> Vec<f64> {
    let n = network.node_count();
    if n < 2 {
        return vec![0.0; n];
    }

    (0..n)
        .into_par_iter()
        .map(|source| {
            let distances = single_source_distances(network, source);
            let (reachable, total) = distances
                .iter()
                .filter(|d| d.is_finite())
                .fold((0usize, 0.0_f64), |(count, sum), d| (count + 1, sum + d));

            if total <= 0.0 || reachable <= 1 {
                return 0.0;
            }
            let others = (reachable - 1) as f64;
            let closeness = others / total;
            if wf_improved {
                closeness * others / (n - 1) as f64
            } else {
                closeness
            }
        })
        .collect()
}

/// Flight-time distance from `source` to every node; unreachable nodes are
/// infinite.
pub(crate) fn single_source_distances(network: &Network, source: NodeIndex) -> Vec<f64> {
    let n = network.node_count();
    let mut distances = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut queue = BinaryHeap::new();

    distances[source] = 0.0;
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        let v = entry.node;
        if settled[v] {
            continue;
        }
        settled[v] = true;

        for edge in network.outgoing(v) {
            let w = edge.node;
            let candidate = distances[v] + network.route(edge.route).weight(CostType::Time);
            if candidate < distances[w] {
                distances[w] = candidate;
                queue.push(QueueEntry::new(w, candidate));
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::network::{Airport, RouteRecord};

    fn airport(iata: &str, lon: f64) -> Airport {
        Airport {
            iata: iata.to_string(),
            name: String::new(),
            city: String::new(),
            country: String::new(),
            latitude: 0.0,
            longitude: lon,
            altitude: 0.0,
        }
    }

    fn chain() -> Network {
        Network::build(
            vec![airport("AAA", 0.0), airport("BBB", 1.0), airport("CCC", 2.0)],
            &[
                RouteRecord::new("AAA", "BBB", "X"),
                RouteRecord::new("BBB", "CCC", "X"),
            ],
            &EngineConfig::default(),
        )
    }

    #[test]
    fn sink_scores_zero() {
        let scores = closeness_centrality(&chain(), true);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn wasserman_faust_scales_by_reach() {
        let network = chain();
        let hop = network.edge("AAA", "BBB").unwrap().time_cost;
        let second = network.edge("BBB", "CCC").unwrap().time_cost;

        let plain = closeness_centrality(&network, false);
        assert!((plain[0] - 2.0 / (hop + second + hop)).abs() < 1e-9);
        assert!((plain[1] - 1.0 / second).abs() < 1e-9);

        let improved = closeness_centrality(&network, true);
        // BBB reaches one of two other airports.
        assert!((improved[1] - plain[1] * 0.5).abs() < 1e-9);
        // AAA reaches everyone, so no penalty.
        assert!((improved[0] - plain[0]).abs() < 1e-9);
    }

    #[test]
    fn distances_mark_unreachable_as_infinite() {
        let distances = single_source_distances(&chain(), 2);
        assert_eq!(distances[2], 0.0);
        assert!(distances[0].is_infinite());
        assert!(distances[1].is_infinite());
    }
}
