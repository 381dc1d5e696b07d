//! High-level facade bundling the network, its country index and the engine
//! configuration.
//!
//! The lower-level modules are tolerant of odd input (unknown codes simply
//! yield no path). The facade is where user input is validated: unknown
//! airports become [`Error::UnknownAirport`] with suggestions and identical
//! endpoints become [`Error::SameEndpoints`].

use std::path::Path;

use tracing::info;

use crate::centrality::{compute_centrality, CentralityMetric, CentralityRecord, CentralityReport};
use crate::config::EngineConfig;
use crate::country::CountryIndex;
use crate::dataset::{load_dataset, Dataset};
use crate::error::{Error, Result};
use crate::hub::{self, ConnectivitySummary, HubOption, RemovalAnalysis};
use crate::metrics::{path_metrics, PathResult};
use crate::network::{Airport, Network, NetworkStats, NodeIndex};
use crate::path::{
    k_shortest_simple_paths, shortest_path, shortest_path_with_stop_limit, CostType, PathLimits,
};

/// Read-only query surface over one loaded flight network.
#[derive(Debug, Clone)]
pub struct FlightEngine {
    network: Network,
    countries: CountryIndex,
    config: EngineConfig,
}

impl FlightEngine {
    /// Wrap an already built network. The configuration is validated first.
    pub fn new(network: Network, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let countries = CountryIndex::from_network(&network);
        info!(
            airports = network.node_count(),
            routes = network.edge_count(),
            countries = countries.len(),
            "flight engine ready"
        );
        Ok(Self {
            network,
            countries,
            config,
        })
    }

    pub fn from_dataset(dataset: Dataset, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let network = dataset.into_network(&config);
        Self::new(network, config)
    }

    /// Load the OpenFlights files in `data_dir` and build the engine.
    pub fn load(data_dir: &Path, config: EngineConfig) -> Result<Self> {
        Self::from_dataset(load_dataset(data_dir)?, config)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn countries(&self) -> &CountryIndex {
        &self.countries
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn endpoints(&self, source: &str, target: &str) -> Result<(NodeIndex, NodeIndex)> {
        let from = self.network.require(source)?;
        let to = self.network.require(target)?;
        if from == to {
            return Err(Error::SameEndpoints {
                code: self.network.code(from).to_string(),
            });
        }
        Ok((from, to))
    }

    /// Optimal route, annotated with domestic transfer times.
    ///
    /// With `max_stops`, the optimal route is returned only if it respects
    /// the bound; a slower route with fewer stops is never substituted.
    /// `Ok(None)` means no acceptable route exists.
    pub fn find_route(
        &self,
        source: &str,
        target: &str,
        cost_type: CostType,
        max_stops: Option<usize>,
    ) -> Result<Option<PathResult>> {
        self.endpoints(source, target)?;
        let path = match max_stops {
            Some(limit) => {
                shortest_path_with_stop_limit(&self.network, source, target, cost_type, limit)
            }
            None => shortest_path(&self.network, source, target, cost_type),
        };
        path.map(|path| path_metrics(&self.network, &path, &self.config))
            .transpose()
    }

    /// Up to `k` alternative routes, best first, capped at the configured
    /// maximum number of stops.
    pub fn find_alternative_routes(
        &self,
        source: &str,
        target: &str,
        cost_type: CostType,
        k: usize,
    ) -> Result<Vec<PathResult>> {
        self.endpoints(source, target)?;
        k_shortest_simple_paths(
            &self.network,
            source,
            target,
            cost_type,
            k,
            PathLimits::from(&self.config),
        )
        .iter()
        .map(|path| path_metrics(&self.network, path, &self.config))
        .collect()
    }

    pub fn centrality(&self) -> CentralityReport {
        compute_centrality(&self.network, &self.config.centrality)
    }

    pub fn top_hubs(&self, k: usize, metric: CentralityMetric) -> Vec<CentralityRecord> {
        self.centrality().top(k, metric)
    }

    pub fn analyze_hub_removal<S: AsRef<str>>(
        &self,
        source: &str,
        target: &str,
        hubs: &[S],
    ) -> Result<RemovalAnalysis> {
        self.endpoints(source, target)?;
        hub::analyze_hub_removal(&self.network, &self.config, source, target, hubs)
    }

    pub fn find_alternative_hubs(
        &self,
        source: &str,
        target: &str,
        primary_hub: &str,
        k: usize,
    ) -> Result<Vec<HubOption>> {
        self.endpoints(source, target)?;
        hub::find_alternative_hubs(
            &self.network,
            &self.countries,
            &self.config,
            source,
            target,
            primary_hub,
            k,
        )
    }

    pub fn hub_connectivity(&self, code: &str) -> Result<ConnectivitySummary> {
        self.network.require(code)?;
        hub::hub_connectivity(&self.network, code).ok_or_else(|| Error::UnknownAirport {
            code: code.to_string(),
            suggestions: Vec::new(),
        })
    }

    pub fn stats(&self) -> NetworkStats {
        self.network.stats()
    }

    pub fn airport(&self, code: &str) -> Result<&Airport> {
        let idx = self.network.require(code)?;
        Ok(self.network.airport_at(idx))
    }

    pub fn search_airports(&self, query: &str, limit: usize) -> Vec<&Airport> {
        self.network.search_airports(query, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::RouteRecord;

    fn airport(iata: &str, lon: f64) -> Airport {
        Airport {
            iata: iata.to_string(),
            name: format!("{iata} Field"),
            city: format!("{iata} Town"),
            country: "Testland".to_string(),
            latitude: 0.0,
            longitude: lon,
            altitude: 0.0,
        }
    }

    fn engine() -> FlightEngine {
        let network = Network::build(
            vec![airport("AAA", 0.0), airport("BBB", 1.0), airport("CCC", 2.0)],
            &[
                RouteRecord::new("AAA", "BBB", "X"),
                RouteRecord::new("BBB", "CCC", "X"),
            ],
            &EngineConfig::default(),
        );
        FlightEngine::new(network, EngineConfig::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = EngineConfig {
            cruise_speed_kmh: 0.0,
            ..EngineConfig::default()
        };
        let err = FlightEngine::new(Network::default(), config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn same_endpoints_are_rejected() {
        let err = engine()
            .find_route("AAA", "aaa", CostType::Time, None)
            .unwrap_err();
        assert!(matches!(err, Error::SameEndpoints { ref code } if code == "AAA"));
    }

    #[test]
    fn unknown_airport_is_not_found() {
        let err = engine()
            .find_route("AAA", "ZZZ", CostType::Time, None)
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(engine().airport("ZZZ").is_err());
        assert!(engine().hub_connectivity("ZZZ").unwrap_err().is_not_found());
    }

    #[test]
    fn unreachable_target_is_none() {
        let route = engine().find_route("CCC", "AAA", CostType::Time, None).unwrap();
        assert!(route.is_none());
    }

    #[test]
    fn stop_limit_rejects_longer_optimum() {
        let engine = engine();
        assert!(engine
            .find_route("AAA", "CCC", CostType::Distance, Some(0))
            .unwrap()
            .is_none());
        let route = engine
            .find_route("AAA", "CCC", CostType::Distance, Some(1))
            .unwrap()
            .unwrap();
        assert_eq!(route.path, ["AAA", "BBB", "CCC"]);
    }
}
