//! Shortest-path and k-shortest simple-path search over a [`Network`].
//!
//! All searches run Dijkstra over non-negative edge weights selected by a
//! [`CostType`]. The k-shortest search is Yen's algorithm driven by an explicit
//! candidate queue: [`SimplePaths`] yields one path per call to `next`, and
//! only computes the deviations of the previously yielded path when asked for
//! the following one.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::network::{Network, NodeIndex};

/// Edge attribute minimised by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    /// Flight time (`time_cost`, hours).
    #[default]
    Time,
    /// Great-circle distance (km).
    Distance,
    /// Monetary cost.
    Cost,
}

impl CostType {
    /// Parse a weight keyword, falling back to [`CostType::Time`] for
    /// anything unrecognised.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "distance" => CostType::Distance,
            "cost" => CostType::Cost,
            _ => CostType::Time,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CostType::Time => "time",
            CostType::Distance => "distance",
            CostType::Cost => "cost",
        }
    }
}

impl From<&str> for CostType {
    fn from(value: &str) -> Self {
        CostType::parse_lenient(value)
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Ordered sequence of airport codes joined by direct routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FlightPath {
    airports: Vec<String>,
}

impl FlightPath {
    pub fn new(airports: Vec<String>) -> Self {
        Self { airports }
    }

    fn from_indices(network: &Network, nodes: &[NodeIndex]) -> Self {
        Self {
            airports: nodes
                .iter()
                .map(|&idx| network.code(idx).to_string())
                .collect(),
        }
    }

    pub fn airports(&self) -> &[String] {
        &self.airports
    }

    pub fn into_airports(self) -> Vec<String> {
        self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Intermediate airports on the path.
    pub fn stops(&self) -> usize {
        self.airports.len().saturating_sub(2)
    }

    pub fn source(&self) -> Option<&str> {
        self.airports.first().map(String::as_str)
    }

    pub fn target(&self) -> Option<&str> {
        self.airports.last().map(String::as_str)
    }

    /// Sum of the selected edge weight along the path, or `None` when a leg
    /// is missing from `network`.
    pub fn total_weight(&self, network: &Network, cost_type: CostType) -> Option<f64> {
        self.airports.windows(2).try_fold(0.0, |total, pair| {
            network
                .edge(&pair[0], &pair[1])
                .map(|route| total + route.weight(cost_type))
        })
    }
}

/// Bounds applied to k-shortest enumeration independently of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLimits {
    /// Paths with more stops than this are skipped and do not count toward k.
    pub max_stops: usize,
    /// Maximum number of simple paths drawn from the enumerator per request.
    pub scan_limit: usize,
}

impl From<&EngineConfig> for PathLimits {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_stops: config.max_stops,
            scan_limit: config.path_scan_limit,
        }
    }
}

impl Default for PathLimits {
    fn default() -> Self {
        PathLimits::from(&EngineConfig::default())
    }
}

/// Lowest-weight path from `source` to `target`.
///
/// Returns `None` when either code is unknown, when both name the same
/// airport, or when `target` is unreachable.
pub fn shortest_path(
    network: &Network,
    source: &str,
    target: &str,
    cost_type: CostType,
) -> Option<FlightPath> {
    let (start, goal) = resolve_endpoints(network, source, target)?;
    let (nodes, weight) = dijkstra(
        network,
        start,
        goal,
        cost_type,
        &HashSet::new(),
        &HashSet::new(),
    )?;
    debug!(%source, %target, %cost_type, weight, hops = nodes.len() - 1, "shortest path found");
    Some(FlightPath::from_indices(network, &nodes))
}

/// Globally shortest path, rejected if it has more than `max_stops` stops.
///
/// This validates the optimal path against the bound; it does not look for
/// the best path that satisfies it.
pub fn shortest_path_with_stop_limit(
    network: &Network,
    source: &str,
    target: &str,
    cost_type: CostType,
    max_stops: usize,
) -> Option<FlightPath> {
    let path = shortest_path(network, source, target, cost_type)?;
    if path.stops() > max_stops {
        debug!(
            stops = path.stops(),
            max_stops, "shortest path exceeds stop limit"
        );
        return None;
    }
    Some(path)
}

/// Up to `k` simple paths in non-decreasing weight order, skipping paths with
/// more than `limits.max_stops` stops.
pub fn k_shortest_simple_paths(
    network: &Network,
    source: &str,
    target: &str,
    cost_type: CostType,
    k: usize,
    limits: PathLimits,
) -> Vec<FlightPath> {
    if k == 0 {
        return Vec::new();
    }
    let Some(paths) = SimplePaths::new(network, source, target, cost_type) else {
        return Vec::new();
    };

    let mut found = Vec::with_capacity(k);
    let mut scanned = 0usize;
    for (path, _) in paths {
        scanned += 1;
        if path.stops() <= limits.max_stops {
            found.push(path);
            if found.len() >= k {
                break;
            }
        }
        if scanned >= limits.scan_limit {
            warn!(
                %source,
                %target,
                scanned,
                found = found.len(),
                "path scan limit reached before collecting k paths"
            );
            break;
        }
    }

    debug!(%source, %target, %cost_type, k, found = found.len(), scanned, "k-shortest search finished");
    found
}

/// Lazily enumerated simple paths in non-decreasing weight order (Yen).
#[derive(Debug)]
pub struct SimplePaths<'a> {
    network: &'a Network,
    cost_type: CostType,
    target: NodeIndex,
    accepted: Vec<Vec<NodeIndex>>,
    candidates: BinaryHeap<Candidate>,
    seen: HashSet<Vec<NodeIndex>>,
}

impl<'a> SimplePaths<'a> {
    /// Start an enumeration. Returns `None` for unknown or identical endpoints.
    pub fn new(
        network: &'a Network,
        source: &str,
        target: &str,
        cost_type: CostType,
    ) -> Option<Self> {
        let (start, goal) = resolve_endpoints(network, source, target)?;
        let mut paths = Self {
            network,
            cost_type,
            target: goal,
            accepted: Vec::new(),
            candidates: BinaryHeap::new(),
            seen: HashSet::new(),
        };
        if let Some((nodes, weight)) = dijkstra(
            network,
            start,
            goal,
            cost_type,
            &HashSet::new(),
            &HashSet::new(),
        ) {
            paths.seen.insert(nodes.clone());
            paths.candidates.push(Candidate::new(nodes, weight));
        }
        Some(paths)
    }

    /// Push every deviation of `last` that has not been seen yet.
    fn extend_candidates(&mut self, last: &[NodeIndex]) {
        for i in 0..last.len() - 1 {
            let spur = last[i];
            let root = &last[..=i];

            let blocked_edges: HashSet<(NodeIndex, NodeIndex)> = self
                .accepted
                .iter()
                .filter(|path| path.len() > i + 1 && &path[..=i] == root)
                .map(|path| (path[i], path[i + 1]))
                .collect();
            let blocked_nodes: HashSet<NodeIndex> = root[..i].iter().copied().collect();

            let Some((spur_path, _)) = dijkstra(
                self.network,
                spur,
                self.target,
                self.cost_type,
                &blocked_nodes,
                &blocked_edges,
            ) else {
                continue;
            };

            let mut nodes = root[..i].to_vec();
            nodes.extend(spur_path);
            if self.seen.insert(nodes.clone()) {
                let weight = path_weight(self.network, &nodes, self.cost_type);
                self.candidates.push(Candidate::new(nodes, weight));
            }
        }
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = (FlightPath, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(last) = self.accepted.last().cloned() {
            self.extend_candidates(&last);
        }
        let candidate = self.candidates.pop()?;
        let path = FlightPath::from_indices(self.network, &candidate.nodes);
        let weight = candidate.weight.0;
        self.accepted.push(candidate.nodes);
        Some((path, weight))
    }
}

fn resolve_endpoints(
    network: &Network,
    source: &str,
    target: &str,
) -> Option<(NodeIndex, NodeIndex)> {
    let start = network.node_index(source)?;
    let goal = network.node_index(target)?;
    if start == goal {
        return None;
    }
    Some((start, goal))
}

pub(crate) fn path_weight(network: &Network, nodes: &[NodeIndex], cost_type: CostType) -> f64 {
    nodes
        .windows(2)
        .map(|pair| {
            network
                .edge_between(pair[0], pair[1])
                .map_or(f64::INFINITY, |route| route.weight(cost_type))
        })
        .sum()
}

/// Dijkstra from `start` to `goal` that never enters `blocked_nodes` and
/// never uses `blocked_edges`. Returns the node sequence and its weight.
pub(crate) fn dijkstra(
    network: &Network,
    start: NodeIndex,
    goal: NodeIndex,
    cost_type: CostType,
    blocked_nodes: &HashSet<NodeIndex>,
    blocked_edges: &HashSet<(NodeIndex, NodeIndex)>,
) -> Option<(Vec<NodeIndex>, f64)> {
    let n = network.node_count();
    let mut distances = vec![f64::INFINITY; n];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut queue = BinaryHeap::new();

    distances[start] = 0.0;
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        if settled[entry.node] {
            continue;
        }
        settled[entry.node] = true;

        if entry.node == goal {
            return Some((reconstruct_path(&parents, start, goal), entry.cost.0));
        }

        for edge in network.outgoing(entry.node) {
            let next = edge.node;
            if settled[next] || blocked_nodes.contains(&next) {
                continue;
            }
            if blocked_edges.contains(&(entry.node, next)) {
                continue;
            }

            let next_cost = entry.cost.0 + network.route(edge.route).weight(cost_type);
            if next_cost < distances[next] {
                distances[next] = next_cost;
                parents[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &[Option<NodeIndex>],
    start: NodeIndex,
    goal: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct QueueEntry {
    pub(crate) node: NodeIndex,
    pub(crate) cost: FloatOrd,
}

impl QueueEntry {
    pub(crate) fn new(node: NodeIndex, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Candidate {
    weight: FloatOrd,
    nodes: Vec<NodeIndex>,
}

impl Candidate {
    fn new(nodes: Vec<NodeIndex>, weight: f64) -> Self {
        Self {
            weight: FloatOrd(weight),
            nodes,
        }
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by weight, then by node sequence for a stable order on ties.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.nodes.cmp(&self.nodes))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Airport, RouteRecord};

    fn airport(iata: &str, lat: f64, lon: f64) -> Airport {
        Airport {
            iata: iata.to_string(),
            name: iata.to_string(),
            city: iata.to_string(),
            country: "Testland".to_string(),
            latitude: lat,
            longitude: lon,
            altitude: 0.0,
        }
    }

    /// Diamond: A -> B -> D, A -> C -> D, A -> D, with C further out.
    fn diamond() -> Network {
        let airports = vec![
            airport("AAA", 0.0, 0.0),
            airport("BBB", 0.0, 1.0),
            airport("CCC", 1.5, 1.0),
            airport("DDD", 0.0, 2.0),
        ];
        let routes = vec![
            RouteRecord::new("AAA", "BBB", "X1"),
            RouteRecord::new("BBB", "DDD", "X1"),
            RouteRecord::new("AAA", "CCC", "X2"),
            RouteRecord::new("CCC", "DDD", "X2"),
            RouteRecord::new("AAA", "DDD", "X3"),
        ];
        Network::build(airports, &routes, &EngineConfig::default())
    }

    #[test]
    fn cost_type_falls_back_to_time() {
        assert_eq!(CostType::parse_lenient("Distance"), CostType::Distance);
        assert_eq!(CostType::parse_lenient(" cost "), CostType::Cost);
        assert_eq!(CostType::parse_lenient("speed"), CostType::Time);
        assert_eq!(CostType::from(""), CostType::Time);
    }

    #[test]
    fn direct_route_wins_on_collinear_points() {
        let network = diamond();
        let path = shortest_path(&network, "AAA", "DDD", CostType::Distance).expect("path");
        // Haversine along the equator: A->D equals A->B + B->D up to rounding,
        // so either the direct edge or the B detour is optimal.
        let weight = path.total_weight(&network, CostType::Distance).unwrap();
        let direct = network.edge("AAA", "DDD").unwrap().distance;
        assert!(weight <= direct + 1e-9);
    }

    #[test]
    fn unknown_or_identical_endpoints_yield_none() {
        let network = diamond();
        assert!(shortest_path(&network, "AAA", "ZZZ", CostType::Time).is_none());
        assert!(shortest_path(&network, "AAA", "AAA", CostType::Time).is_none());
        assert!(shortest_path(&network, "DDD", "AAA", CostType::Time).is_none());
    }

    #[test]
    fn enumerates_every_simple_path_in_order() {
        let network = diamond();
        let all: Vec<_> = SimplePaths::new(&network, "AAA", "DDD", CostType::Time)
            .expect("endpoints known")
            .collect();
        assert_eq!(all.len(), 3);
        for pair in all.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
        let unique: HashSet<_> = all.iter().map(|(path, _)| path.clone()).collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn stop_cap_filters_without_counting() {
        let network = diamond();
        let limits = PathLimits {
            max_stops: 0,
            scan_limit: 100,
        };
        let paths = k_shortest_simple_paths(&network, "AAA", "DDD", CostType::Time, 5, limits);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].airports(), ["AAA", "DDD"]);
    }

    #[test]
    fn zero_k_is_empty() {
        let network = diamond();
        let paths =
            k_shortest_simple_paths(&network, "AAA", "DDD", CostType::Time, 0, PathLimits::default());
        assert!(paths.is_empty());
    }

    #[test]
    fn queue_entry_is_min_heap() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry::new(1, 5.0));
        heap.push(QueueEntry::new(2, 1.0));
        heap.push(QueueEntry::new(3, 3.0));
        assert_eq!(heap.pop().map(|e| e.node), Some(2));
        assert_eq!(heap.pop().map(|e| e.node), Some(3));
    }
}
