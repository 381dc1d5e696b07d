//! Route commands: `route` and `alternatives`.

use anyhow::{bail, Result};

use flightnet_lib::{CostType, FlightEngine};

use crate::output::{emit, format_route, format_routes, OutputFormat};

/// Handle the route subcommand.
///
/// With `max_stops`, the optimal route is shown only when it respects the
/// limit. A missing route is reported as an error.
pub fn handle_route(
    engine: &FlightEngine,
    from: &str,
    to: &str,
    optimize: &str,
    max_stops: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let cost_type = CostType::parse_lenient(optimize);
    let Some(route) = engine.find_route(from, to, cost_type, max_stops)? else {
        match max_stops {
            Some(limit) => bail!("no route from {from} to {to} within {limit} stops"),
            None => bail!("no route from {from} to {to}"),
        }
    };
    emit(format, &route, format_route)
}

pub fn handle_alternatives(
    engine: &FlightEngine,
    from: &str,
    to: &str,
    optimize: &str,
    k: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let cost_type = CostType::parse_lenient(optimize);
    let k = k.unwrap_or(engine.config().default_k_paths);
    let routes = engine.find_alternative_routes(from, to, cost_type, k)?;
    emit(format, &routes, |found| format_routes(found))
}
