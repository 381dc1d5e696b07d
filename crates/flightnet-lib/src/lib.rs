//! Flight network library entry points.
//!
//! This crate builds a directed, weighted flight-route network from airport
//! and route records and answers questions about it: optimal and alternative
//! routes, structural importance of airports, and what-if scenarios that
//! remove hub airports. Higher-level consumers (the CLI) should only depend on
//! the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod centrality;
pub mod config;
pub mod country;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod geo;
pub mod hub;
pub mod metrics;
pub mod network;
pub mod path;

pub use centrality::{compute_centrality, top_hubs, CentralityMetric, CentralityRecord, CentralityReport};
pub use config::{CentralityConfig, EngineConfig, PageRankConfig};
pub use country::CountryIndex;
pub use dataset::{load_dataset, resolve_data_dir, Dataset};
pub use engine::FlightEngine;
pub use error::{Error, Result};
pub use geo::{distance_km, Coordinates};
pub use hub::{
    analyze_hub_removal, find_alternative_hubs, hub_connectivity, ConnectivitySummary, HubOption,
    RemovalAnalysis,
};
pub use metrics::{path_metrics, path_metrics_with_transfers, PathResult, Segment};
pub use network::{Airport, Network, NetworkStats, Route, RouteRecord};
pub use path::{
    k_shortest_simple_paths, shortest_path, shortest_path_with_stop_limit, CostType, FlightPath,
    PathLimits,
};
