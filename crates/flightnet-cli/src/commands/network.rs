//! Network overview commands: `stats`, `search` and `airport`.

use anyhow::Result;

use flightnet_lib::FlightEngine;

use crate::output::{emit, format_airport, format_airport_list, format_stats, OutputFormat};

pub fn handle_stats(engine: &FlightEngine, format: OutputFormat) -> Result<()> {
    emit(format, &engine.stats(), format_stats)
}

pub fn handle_search(
    engine: &FlightEngine,
    query: &str,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let airports = engine.search_airports(query, limit);
    emit(format, &airports, |found| format_airport_list(found))
}

pub fn handle_airport(engine: &FlightEngine, code: &str, format: OutputFormat) -> Result<()> {
    let airport = engine.airport(code)?;
    emit(format, airport, format_airport)
}
