//! What-if analysis around hub airports.
//!
//! Removal analysis works on a transient copy built with
//! [`Network::remove_nodes`]; the canonical network is only ever read.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::country::CountryIndex;
use crate::error::Result;
use crate::metrics::{path_metrics, PathResult, Segment, DISPLAY_PRECISION};
use crate::network::{round_to, Network};
use crate::path::{shortest_path, CostType};

/// Number of destinations and origins listed in a [`ConnectivitySummary`].
pub const CONNECTIVITY_SAMPLE: usize = 10;

/// Outcome of removing one or more hubs between two airports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovalAnalysis {
    /// Hubs as requested by the caller, including any that were ignored.
    pub removed_hubs: Vec<String>,
    pub original_path: Option<PathResult>,
    pub alternative_path: Option<PathResult>,
    /// Whether a route survives the removal.
    pub path_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_increase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_increase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_increase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops_increase: Option<i64>,
}

/// One-stop itinerary through an alternative hub.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubOption {
    pub hub: String,
    pub hub_name: String,
    pub hub_city: String,
    pub hub_country: String,
    pub is_international_transfer: bool,
    pub total_time: f64,
    pub total_distance: f64,
    pub total_cost: f64,
    pub transfer_time: f64,
    pub segments: Vec<Segment>,
}

/// Direct connectivity of a single airport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivitySummary {
    pub iata: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub num_destinations: usize,
    pub num_origins: usize,
    /// Distinct airports connected in either direction.
    pub total_connections: usize,
    /// Distinct country values among all directly connected airports. A
    /// blank country counts as one value of its own.
    pub countries_served: usize,
    /// First destinations in network order; not ranked by traffic.
    pub top_destinations: Vec<String>,
    /// First origins in network order; not ranked by traffic.
    pub top_origins: Vec<String>,
}

/// Compare the fastest route before and after removing `hubs`.
///
/// The source and target are never removed, even when listed. A missing
/// route after removal is reported through `path_exists` rather than an
/// error; only unknown endpoints fail.
pub fn analyze_hub_removal<S: AsRef<str>>(
    network: &Network,
    config: &EngineConfig,
    source: &str,
    target: &str,
    hubs: &[S],
) -> Result<RemovalAnalysis> {
    let from = network.require(source)?;
    let to = network.require(target)?;
    let source = network.code(from);
    let target = network.code(to);

    let original_path = match shortest_path(network, source, target, CostType::Time) {
        Some(path) => Some(path_metrics(network, &path, config)?),
        None => None,
    };

    let removable: Vec<&str> = hubs
        .iter()
        .map(AsRef::as_ref)
        .filter(|code| {
            network
                .node_index(code)
                .is_some_and(|idx| idx != from && idx != to)
        })
        .collect();
    let reduced = network.remove_nodes(&removable);

    let alternative_path = match shortest_path(&reduced, source, target, CostType::Time) {
        Some(path) => Some(path_metrics(&reduced, &path, config)?),
        None => None,
    };

    let mut analysis = RemovalAnalysis {
        removed_hubs: hubs.iter().map(|hub| hub.as_ref().to_string()).collect(),
        path_exists: alternative_path.is_some(),
        original_path,
        alternative_path,
        time_increase: None,
        cost_increase: None,
        distance_increase: None,
        stops_increase: None,
    };

    if let (Some(original), Some(alternative)) =
        (&analysis.original_path, &analysis.alternative_path)
    {
        analysis.time_increase = Some(round_to(
            alternative.total_time - original.total_time,
            DISPLAY_PRECISION,
        ));
        analysis.cost_increase = Some(round_to(
            alternative.total_cost - original.total_cost,
            DISPLAY_PRECISION,
        ));
        analysis.distance_increase = Some(round_to(
            alternative.total_distance - original.total_distance,
            DISPLAY_PRECISION,
        ));
        analysis.stops_increase = Some(stop_delta(original.stops, alternative.stops));
    }

    info!(
        source,
        target,
        removed = removable.len(),
        path_exists = analysis.path_exists,
        "analyzed hub removal"
    );
    Ok(analysis)
}

fn stop_delta(original: usize, alternative: usize) -> i64 {
    let original = i64::try_from(original).unwrap_or(i64::MAX);
    let alternative = i64::try_from(alternative).unwrap_or(i64::MAX);
    alternative - original
}

/// Every one-stop hub between `source` and `target` other than `primary_hub`,
/// fastest first, at most `k` of them.
///
/// Transfer time at the hub uses the international duration whenever the
/// [`CountryIndex`] classifies the transfer as international. Ties on total
/// time keep network order.
pub fn find_alternative_hubs(
    network: &Network,
    countries: &CountryIndex,
    config: &EngineConfig,
    source: &str,
    target: &str,
    primary_hub: &str,
    k: usize,
) -> Result<Vec<HubOption>> {
    let from = network.require(source)?;
    let to = network.require(target)?;
    let primary = network.require(primary_hub)?;
    let source = network.code(from);
    let target = network.code(to);

    let mut options: Vec<(f64, HubOption)> = Vec::new();
    for edge in network.outgoing(from) {
        let hub = edge.node;
        if hub == to || hub == from || hub == primary {
            continue;
        }
        let Some(second) = network.edge_between(hub, to) else {
            continue;
        };
        let first = network.route(edge.route);
        let airport = network.airport_at(hub);

        let international = countries.is_international_transfer(source, &airport.iata, target);
        let transfer = config.transfer_hours(international);
        let total_time = first.time_cost + second.time_cost + transfer;

        options.push((
            total_time,
            HubOption {
                hub: airport.iata.clone(),
                hub_name: airport.name.clone(),
                hub_city: airport.city.clone(),
                hub_country: airport.country.clone(),
                is_international_transfer: international,
                total_time: round_to(total_time, DISPLAY_PRECISION),
                total_distance: round_to(first.distance + second.distance, DISPLAY_PRECISION),
                total_cost: round_to(
                    first.monetary_cost + second.monetary_cost,
                    DISPLAY_PRECISION,
                ),
                transfer_time: round_to(transfer, DISPLAY_PRECISION),
                segments: vec![Segment::from_route(first), Segment::from_route(second)],
            },
        ));
    }

    // Outgoing edges are in edge order; restore node order before the stable
    // sort so ties resolve the same way regardless of route file layout.
    options.sort_by_key(|(_, option)| network.node_index(&option.hub));
    options.sort_by(|a, b| a.0.total_cmp(&b.0));

    debug!(
        source,
        target,
        primary_hub = network.code(primary),
        candidates = options.len(),
        "found alternative hubs"
    );
    Ok(options
        .into_iter()
        .take(k)
        .map(|(_, option)| option)
        .collect())
}

/// Direct connectivity of `code`, or `None` when the airport is unknown.
pub fn hub_connectivity(network: &Network, code: &str) -> Option<ConnectivitySummary> {
    let idx = network.node_index(code)?;
    let airport = network.airport_at(idx);
    let outgoing = network.outgoing(idx);
    let incoming = network.incoming(idx);

    let connected: HashSet<usize> = outgoing
        .iter()
        .chain(incoming)
        .map(|edge| edge.node)
        .collect();
    let countries: HashSet<&str> = connected
        .iter()
        .map(|&node| network.airport_at(node).country.as_str())
        .collect();

    Some(ConnectivitySummary {
        iata: airport.iata.clone(),
        name: airport.name.clone(),
        city: airport.city.clone(),
        country: airport.country.clone(),
        num_destinations: outgoing.len(),
        num_origins: incoming.len(),
        total_connections: connected.len(),
        countries_served: countries.len(),
        top_destinations: outgoing
            .iter()
            .take(CONNECTIVITY_SAMPLE)
            .map(|edge| network.code(edge.node).to_string())
            .collect(),
        top_origins: incoming
            .iter()
            .take(CONNECTIVITY_SAMPLE)
            .map(|edge| network.code(edge.node).to_string())
            .collect(),
    })
}
