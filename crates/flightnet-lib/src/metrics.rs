//! Itinerary annotation: per-leg and aggregate distance, time and cost.
//!
//! The network is always passed in explicitly so that callers can annotate a
//! path against a reduced copy (hub removal) without touching the canonical
//! network.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::network::{round_to, Network, Route};
use crate::path::FlightPath;

/// Fractional digits kept in display fields.
pub const DISPLAY_PRECISION: i32 = 2;

/// One leg of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub time: f64,
    pub cost: f64,
    pub airline: String,
}

impl Segment {
    pub(crate) fn from_route(route: &Route) -> Self {
        Self {
            from: route.source.clone(),
            to: route.destination.clone(),
            distance: round_to(route.distance, DISPLAY_PRECISION),
            time: round_to(route.time_cost, DISPLAY_PRECISION),
            cost: round_to(route.monetary_cost, DISPLAY_PRECISION),
            airline: if route.airline.is_empty() {
                "N/A".to_string()
            } else {
                route.airline.clone()
            },
        }
    }
}

/// Fully annotated itinerary.
///
/// Totals are accumulated at full precision and rounded only for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub path: Vec<String>,
    pub segments: Vec<Segment>,
    pub stops: usize,
    pub total_distance: f64,
    pub total_flight_time: f64,
    pub total_transfer_time: f64,
    pub total_time: f64,
    pub total_cost: f64,
}

/// Annotate a path, treating every intermediate stop as a domestic transfer.
pub fn path_metrics(
    network: &Network,
    path: &FlightPath,
    config: &EngineConfig,
) -> Result<PathResult> {
    path_metrics_with_transfers(network, path, config, |_| false)
}

/// Annotate a path, asking `is_international` for each intermediate stop.
pub fn path_metrics_with_transfers<F>(
    network: &Network,
    path: &FlightPath,
    config: &EngineConfig,
    is_international: F,
) -> Result<PathResult>
where
    F: Fn(&str) -> bool,
{
    let airports = path.airports();
    let mut segments = Vec::with_capacity(airports.len().saturating_sub(1));
    let mut total_distance = 0.0;
    let mut total_flight_time = 0.0;
    let mut total_cost = 0.0;

    for pair in airports.windows(2) {
        let route = network
            .edge(&pair[0], &pair[1])
            .ok_or_else(|| Error::MissingEdge {
                from: pair[0].clone(),
                to: pair[1].clone(),
            })?;
        total_distance += route.distance;
        total_flight_time += route.time_cost;
        total_cost += route.monetary_cost;
        segments.push(Segment::from_route(route));
    }

    let total_transfer_time: f64 = if airports.len() > 2 {
        airports[1..airports.len() - 1]
            .iter()
            .map(|stop| config.transfer_hours(is_international(stop)))
            .sum()
    } else {
        0.0
    };

    Ok(PathResult {
        path: airports.to_vec(),
        segments,
        stops: path.stops(),
        total_distance: round_to(total_distance, DISPLAY_PRECISION),
        total_flight_time: round_to(total_flight_time, DISPLAY_PRECISION),
        total_transfer_time: round_to(total_transfer_time, DISPLAY_PRECISION),
        total_time: round_to(total_flight_time + total_transfer_time, DISPLAY_PRECISION),
        total_cost: round_to(total_cost, DISPLAY_PRECISION),
    })
}
