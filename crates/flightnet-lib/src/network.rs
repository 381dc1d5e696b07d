use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::path::CostType;

/// Dense index of an airport inside a [`Network`].
pub type NodeIndex = usize;

/// Default result cap for [`Network::search_airports`].
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Number of suggestions attached to an unknown-airport error.
const MAX_SUGGESTIONS: usize = 3;

/// Airport record and network node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub iata: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Airport {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Validated direct-flight record as supplied by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub source_iata: String,
    pub destination_iata: String,
    pub airline: String,
}

impl RouteRecord {
    pub fn new(
        source_iata: impl Into<String>,
        destination_iata: impl Into<String>,
        airline: impl Into<String>,
    ) -> Self {
        Self {
            source_iata: source_iata.into(),
            destination_iata: destination_iata.into(),
            airline: airline.into(),
        }
    }
}

/// Directed route retained in the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub source: String,
    pub destination: String,
    /// Great-circle distance in kilometres.
    pub distance: f64,
    /// Flight time in hours.
    pub time_cost: f64,
    pub monetary_cost: f64,
    pub airline: String,
}

impl Route {
    /// Edge attribute minimised for the given selector.
    pub fn weight(&self, cost_type: CostType) -> f64 {
        match cost_type {
            CostType::Time => self.time_cost,
            CostType::Distance => self.distance,
            CostType::Cost => self.monetary_cost,
        }
    }
}

/// Adjacency entry pointing at a neighbouring node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Neighbouring node (destination for outgoing, origin for incoming edges).
    pub node: NodeIndex,
    /// Position of the route in [`Network::routes`].
    pub route: usize,
}

/// Summary statistics for a network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub num_airports: usize,
    pub num_routes: usize,
    pub avg_degree: f64,
    pub is_connected: bool,
    pub num_components: usize,
}

/// Canonical directed, weighted flight network.
///
/// Nodes keep the order in which airports were supplied and edges keep the
/// order in which their (source, destination) pair was first seen. All
/// "iteration order" guarantees in the library refer to these orders.
#[derive(Debug, Clone, Default)]
pub struct Network {
    airports: Vec<Airport>,
    index: HashMap<String, NodeIndex>,
    routes: Vec<Route>,
    edge_lookup: HashMap<(NodeIndex, NodeIndex), usize>,
    outgoing: Vec<Vec<Edge>>,
    incoming: Vec<Vec<Edge>>,
}

impl Network {
    /// Build the network from validated airport and route records.
    ///
    /// Routes whose endpoints are unknown are dropped, as are self-loops,
    /// which no simple path can use. When several routes
    /// share an ordered pair, the one with the strictly lowest monetary cost
    /// wins and its whole attribute set replaces the kept edge; exact ties keep
    /// the first edge seen. The rule applies regardless of the weight later
    /// used for queries.
    pub fn build(airports: Vec<Airport>, routes: &[RouteRecord], config: &EngineConfig) -> Self {
        let mut network = Network::default();
        for mut airport in airports {
            airport.iata = airport.iata.trim().to_ascii_uppercase();
            if network.index.contains_key(&airport.iata) {
                warn!(iata = %airport.iata, "duplicate airport record ignored");
                continue;
            }
            network.push_airport(airport);
        }
        info!(airports = network.node_count(), "added airport nodes");

        let mut dropped = 0usize;
        for record in routes {
            let source = record.source_iata.trim().to_ascii_uppercase();
            let destination = record.destination_iata.trim().to_ascii_uppercase();
            let (Some(&from), Some(&to)) = (network.index.get(&source), network.index.get(&destination))
            else {
                dropped += 1;
                continue;
            };
            if from == to {
                debug!(iata = %source, "self-loop route dropped");
                dropped += 1;
                continue;
            }

            let distance = network.airports[from]
                .coordinates()
                .distance_to(&network.airports[to].coordinates());
            let route = Route {
                source,
                destination,
                distance,
                time_cost: distance / config.cruise_speed_kmh,
                monetary_cost: distance * config.cost_per_km,
                airline: record.airline.clone(),
            };

            match network.edge_lookup.get(&(from, to)) {
                Some(&existing) => {
                    if route.monetary_cost < network.routes[existing].monetary_cost {
                        network.routes[existing] = route;
                    }
                }
                None => network.push_route(from, to, route),
            }
        }

        info!(
            routes = network.edge_count(),
            dropped, "added route edges"
        );
        network
    }

    fn push_airport(&mut self, airport: Airport) {
        let idx = self.airports.len();
        self.index.insert(airport.iata.clone(), idx);
        self.airports.push(airport);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
    }

    fn push_route(&mut self, from: NodeIndex, to: NodeIndex, route: Route) {
        let id = self.routes.len();
        self.routes.push(route);
        self.edge_lookup.insert((from, to), id);
        self.outgoing[from].push(Edge { node: to, route: id });
        self.incoming[to].push(Edge {
            node: from,
            route: id,
        });
    }

    /// Return an independent copy with the given airports and their incident
    /// routes removed. Unknown codes are ignored and the receiver is untouched.
    pub fn remove_nodes<S: AsRef<str>>(&self, codes: &[S]) -> Network {
        let removed: HashSet<NodeIndex> = codes
            .iter()
            .filter_map(|code| self.node_index(code.as_ref()))
            .collect();

        let mut copy = Network::default();
        for (idx, airport) in self.airports.iter().enumerate() {
            if !removed.contains(&idx) {
                copy.push_airport(airport.clone());
            }
        }
        for route in &self.routes {
            if let (Some(&from), Some(&to)) =
                (copy.index.get(&route.source), copy.index.get(&route.destination))
            {
                copy.push_route(from, to, route.clone());
            }
        }

        debug!(
            removed = removed.len(),
            airports = copy.node_count(),
            routes = copy.edge_count(),
            "built reduced network copy"
        );
        copy
    }

    pub fn node_count(&self) -> usize {
        self.airports.len()
    }

    pub fn edge_count(&self) -> usize {
        self.routes.len()
    }

    /// Airports in node order.
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Routes in edge order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve an IATA code (case-insensitive) to its node index.
    pub fn node_index(&self, code: &str) -> Option<NodeIndex> {
        if let Some(&idx) = self.index.get(code) {
            return Some(idx);
        }
        self.index.get(&code.trim().to_ascii_uppercase()).copied()
    }

    /// Resolve a code or fail with [`Error::UnknownAirport`] carrying the
    /// closest known codes.
    pub fn require(&self, code: &str) -> Result<NodeIndex> {
        self.node_index(code).ok_or_else(|| Error::UnknownAirport {
            code: code.to_string(),
            suggestions: self.suggest_airports(code, MAX_SUGGESTIONS),
        })
    }

    pub fn has_node(&self, code: &str) -> bool {
        self.node_index(code).is_some()
    }

    /// Airport for a code, if present.
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.node_index(code).map(|idx| &self.airports[idx])
    }

    /// Airport at a node index.
    pub fn airport_at(&self, idx: NodeIndex) -> &Airport {
        &self.airports[idx]
    }

    /// IATA code at a node index.
    pub fn code(&self, idx: NodeIndex) -> &str {
        &self.airports[idx].iata
    }

    pub fn has_edge(&self, source: &str, destination: &str) -> bool {
        self.edge(source, destination).is_some()
    }

    /// Route between two airports, if one exists in that direction.
    pub fn edge(&self, source: &str, destination: &str) -> Option<&Route> {
        let from = self.node_index(source)?;
        let to = self.node_index(destination)?;
        self.edge_between(from, to)
    }

    /// Route between two node indices, if one exists in that direction.
    pub fn edge_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&Route> {
        self.edge_lookup.get(&(from, to)).map(|&id| &self.routes[id])
    }

    pub fn route(&self, id: usize) -> &Route {
        &self.routes[id]
    }

    /// Outgoing adjacency for a node.
    pub fn outgoing(&self, idx: NodeIndex) -> &[Edge] {
        self.outgoing.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Incoming adjacency for a node.
    pub fn incoming(&self, idx: NodeIndex) -> &[Edge] {
        self.incoming.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Airports directly reachable from `code`, in edge order.
    pub fn successors(&self, code: &str) -> Vec<&str> {
        self.node_index(code)
            .map(|idx| {
                self.outgoing[idx]
                    .iter()
                    .map(|edge| self.code(edge.node))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Airports with a direct route into `code`, in edge order.
    pub fn predecessors(&self, code: &str) -> Vec<&str> {
        self.node_index(code)
            .map(|idx| {
                self.incoming[idx]
                    .iter()
                    .map(|edge| self.code(edge.node))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.incoming(idx).len()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.outgoing(idx).len()
    }

    /// Components of the graph with edge direction ignored, each listed in
    /// discovery order and ordered by their first node.
    pub fn weakly_connected_components(&self) -> Vec<Vec<String>> {
        let mut seen = vec![false; self.node_count()];
        let mut components = Vec::new();

        for start in 0..self.node_count() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut queue = VecDeque::from([start]);
            let mut component = Vec::new();
            while let Some(current) = queue.pop_front() {
                component.push(self.code(current).to_string());
                let neighbours = self.outgoing[current]
                    .iter()
                    .chain(self.incoming[current].iter());
                for edge in neighbours {
                    if !seen[edge.node] {
                        seen[edge.node] = true;
                        queue.push_back(edge.node);
                    }
                }
            }
            components.push(component);
        }

        components
    }

    /// An empty network is not considered connected.
    pub fn is_weakly_connected(&self) -> bool {
        self.node_count() > 0 && self.weakly_connected_components().len() == 1
    }

    pub fn stats(&self) -> NetworkStats {
        let n = self.node_count();
        let avg_degree = if n == 0 {
            0.0
        } else {
            round_to(2.0 * self.edge_count() as f64 / n as f64, 2)
        };
        let num_components = self.weakly_connected_components().len();
        NetworkStats {
            num_airports: n,
            num_routes: self.edge_count(),
            avg_degree,
            is_connected: n > 0 && num_components == 1,
            num_components,
        }
    }

    /// Case-insensitive substring search over name, city, IATA code and country.
    pub fn search_airports(&self, query: &str, limit: usize) -> Vec<&Airport> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.airports
            .iter()
            .filter(|airport| {
                airport.name.to_lowercase().contains(&needle)
                    || airport.city.to_lowercase().contains(&needle)
                    || airport.iata.to_lowercase().contains(&needle)
                    || airport.country.to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect()
    }

    /// Closest airport codes or names to an unknown query, best first.
    pub fn suggest_airports(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .airports
            .iter()
            .map(|airport| {
                let by_code = strsim::jaro_winkler(&needle, &airport.iata);
                let by_name =
                    strsim::jaro_winkler(&needle, &airport.name.to_ascii_uppercase());
                (by_code.max(by_name), airport.iata.as_str())
            })
            .filter(|(score, _)| *score >= 0.8)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }
}

pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
