//! Whole-network centrality analysis.
//!
//! This module is organized into one submodule per score:
//!
//! - [`degree`] - in + out degree normalised by N-1
//! - [`betweenness`] - Brandes accumulation over time-weighted shortest paths
//! - [`closeness`] - Wasserman-Faust closeness over time-weighted distances
//! - [`pagerank`] - power iteration with inverse flight-time transition weights
//!
//! All four scores are recomputed together on every call to
//! [`compute_centrality`]; nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use flightnet_lib::centrality::{top_hubs, CentralityMetric};
//! use flightnet_lib::{EngineConfig, Network};
//!
//! # fn demo(network: &Network) {
//! let config = EngineConfig::default();
//! for hub in top_hubs(network, 10, CentralityMetric::Betweenness, &config.centrality) {
//!     println!("{} {:.4}", hub.iata, hub.betweenness_centrality);
//! }
//! # }
//! ```

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod pagerank;

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::CentralityConfig;
use crate::network::Network;

pub use betweenness::betweenness_centrality;
pub use closeness::closeness_centrality;
pub use degree::degree_centrality;
pub use pagerank::pagerank;

/// Score used to rank hubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityMetric {
    #[default]
    Degree,
    Betweenness,
    Closeness,
    #[serde(rename = "pagerank")]
    PageRank,
}

impl CentralityMetric {
    /// Parse a metric keyword, falling back to [`CentralityMetric::Degree`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "betweenness" => CentralityMetric::Betweenness,
            "closeness" => CentralityMetric::Closeness,
            "pagerank" => CentralityMetric::PageRank,
            _ => CentralityMetric::Degree,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CentralityMetric::Degree => "degree",
            CentralityMetric::Betweenness => "betweenness",
            CentralityMetric::Closeness => "closeness",
            CentralityMetric::PageRank => "pagerank",
        }
    }

    /// Score of this metric in a record.
    pub fn value(self, record: &CentralityRecord) -> f64 {
        match self {
            CentralityMetric::Degree => record.degree_centrality,
            CentralityMetric::Betweenness => record.betweenness_centrality,
            CentralityMetric::Closeness => record.closeness_centrality,
            CentralityMetric::PageRank => record.pagerank,
        }
    }
}

impl fmt::Display for CentralityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Centrality scores and raw degrees for one airport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRecord {
    pub iata: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
    pub pagerank: f64,
    pub in_degree: usize,
    pub out_degree: usize,
    pub total_degree: usize,
}

/// Centrality records for every airport, in node order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CentralityReport {
    records: Vec<CentralityRecord>,
}

impl CentralityReport {
    pub fn records(&self) -> &[CentralityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&CentralityRecord> {
        self.records
            .iter()
            .find(|record| record.iata.eq_ignore_ascii_case(code))
    }

    /// The `k` highest-scoring records, ties kept in node order.
    pub fn top(self, k: usize, metric: CentralityMetric) -> Vec<CentralityRecord> {
        let mut records = self.records;
        // `sort_by` is stable, so equal scores keep their enumeration order.
        records.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
        records.truncate(k);
        records
    }
}

/// Compute degree, betweenness, closeness and `PageRank` for every airport.
pub fn compute_centrality(network: &Network, config: &CentralityConfig) -> CentralityReport {
    let started = Instant::now();
    let n = network.node_count();

    let degree = degree_centrality(network);
    let betweenness = betweenness_centrality(network, config.betweenness_normalized);
    let closeness = closeness_centrality(network, config.closeness_wf_improved);
    let ranks = pagerank(network, &config.pagerank);

    let records = network
        .airports()
        .iter()
        .enumerate()
        .map(|(idx, airport)| {
            let in_degree = network.in_degree(idx);
            let out_degree = network.out_degree(idx);
            CentralityRecord {
                iata: airport.iata.clone(),
                name: airport.name.clone(),
                city: airport.city.clone(),
                country: airport.country.clone(),
                degree_centrality: degree[idx],
                betweenness_centrality: betweenness[idx],
                closeness_centrality: closeness[idx],
                pagerank: ranks[idx],
                in_degree,
                out_degree,
                total_degree: in_degree + out_degree,
            }
        })
        .collect();

    info!(
        airports = n,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "centrality metrics calculated"
    );
    CentralityReport { records }
}

/// Highest-ranked `k` airports by `metric`, stable on ties.
pub fn top_hubs(
    network: &Network,
    k: usize,
    metric: CentralityMetric,
    config: &CentralityConfig,
) -> Vec<CentralityRecord> {
    compute_centrality(network, config).top(k, metric)
}
