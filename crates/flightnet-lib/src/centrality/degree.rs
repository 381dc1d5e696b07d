//! Degree centrality.

use crate::network::Network;

/// `(in-degree + out-degree) / (N - 1)` for every node, in node order.
///
/// Networks with fewer than two airports score 0 everywhere. An airport
/// with flights both to and from every other airport scores 2.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(network: &Network) -> Vec<f64> {
    let n = network.node_count();
    if n < 2 {
        return vec![0.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n)
        .map(|idx| (network.in_degree(idx) + network.out_degree(idx)) as f64 * scale)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::network::{Airport, RouteRecord};

    fn airport(iata: &str) -> Airport {
        Airport {
            iata: iata.to_string(),
            name: String::new(),
            city: String::new(),
            country: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
        }
    }

    #[test]
    fn chain_degrees() {
        let network = Network::build(
            vec![airport("AAA"), airport("BBB"), airport("CCC")],
            &[
                RouteRecord::new("AAA", "BBB", "X"),
                RouteRecord::new("BBB", "CCC", "X"),
            ],
            &EngineConfig::default(),
        );
        assert_eq!(degree_centrality(&network), vec![0.5, 1.0, 0.5]);
    }

    #[test]
    fn single_airport_scores_zero() {
        let network = Network::build(vec![airport("AAA")], &[], &EngineConfig::default());
        assert_eq!(degree_centrality(&network), vec![0.0]);
    }
}
