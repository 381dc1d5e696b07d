//! `PageRank` over the flight network.
//!
//! A random traveller leaves each airport along one of its outgoing routes,
//! preferring quick flights: a route's transition weight is the inverse of
//! its flight time, normalised over the airport's outgoing routes so the
//! probabilities sum to 1. Airports without departures spread their mass
//! uniformly, and every step teleports with probability `1 - damping`.
//!
//! Each iteration pulls mass along incoming routes in parallel and only
//! swaps score vectors once the whole iteration is done.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::PageRankConfig;
use crate::network::Network;

/// Routes shorter than this (hours) carry no transition weight, so a pair of
/// co-located airports cannot trap the walk between them.
const MIN_EDGE_HOURS: f64 = 1e-3;

/// `PageRank` for every node, in node order. Scores sum to 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(network: &Network, config: &PageRankConfig) -> Vec<f64> {
    let n = network.node_count();
    if n == 0 {
        return Vec::new();
    }
    let nf = n as f64;
    let damping = config.damping;

    let out_weight: Vec<f64> = (0..n)
        .map(|idx| {
            network
                .outgoing(idx)
                .iter()
                .map(|edge| transition_weight(network, edge.route))
                .sum()
        })
        .collect();
    let dangling: Vec<usize> = (0..n).filter(|&idx| out_weight[idx] == 0.0).collect();

    let mut scores = vec![1.0 / nf; n];
    for iteration in 1..=config.max_iterations {
        let dangling_mass: f64 = dangling.iter().map(|&idx| scores[idx]).sum();
        let base = (damping * dangling_mass + (1.0 - damping)) / nf;

        let next: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|target| {
                let inflow: f64 = network
                    .incoming(target)
                    .iter()
                    .filter(|edge| out_weight[edge.node] > 0.0)
                    .map(|edge| {
                        scores[edge.node] * transition_weight(network, edge.route)
                            / out_weight[edge.node]
                    })
                    .sum();
                damping * inflow + base
            })
            .collect();

        let change: f64 = next
            .iter()
            .zip(&scores)
            .map(|(new, old)| (new - old).abs())
            .sum();
        scores = next;

        if change < nf * config.tolerance {
            debug!(iteration, change, "pagerank converged");
            return scores;
        }
    }

    warn!(
        max_iterations = config.max_iterations,
        "pagerank did not converge; returning last iterate"
    );
    scores
}

fn transition_weight(network: &Network, route: usize) -> f64 {
    let hours = network.route(route).time_cost;
    if hours < MIN_EDGE_HOURS {
        0.0
    } else {
        1.0 / hours
    }
}
