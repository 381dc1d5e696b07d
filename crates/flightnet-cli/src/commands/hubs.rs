//! Hub commands: `top-hubs`, `hub`, `remove-hubs` and `alt-hubs`.

use anyhow::Result;
use tracing::debug;

use flightnet_lib::{CentralityMetric, FlightEngine};

use crate::output::{
    emit, format_connectivity, format_hub_options, format_hubs, format_removal, OutputFormat,
};

pub fn handle_top_hubs(
    engine: &FlightEngine,
    k: Option<usize>,
    metric: &str,
    format: OutputFormat,
) -> Result<()> {
    let metric = CentralityMetric::parse_lenient(metric);
    let k = k.unwrap_or(engine.config().top_hubs_count);
    debug!(k, %metric, "ranking hubs");
    let hubs = engine.top_hubs(k, metric);
    emit(format, &hubs, |ranked| format_hubs(ranked, metric))
}

pub fn handle_hub(engine: &FlightEngine, code: &str, format: OutputFormat) -> Result<()> {
    let summary = engine.hub_connectivity(code)?;
    emit(format, &summary, format_connectivity)
}

pub fn handle_remove_hubs(
    engine: &FlightEngine,
    from: &str,
    to: &str,
    hubs: &[String],
    format: OutputFormat,
) -> Result<()> {
    let analysis = engine.analyze_hub_removal(from, to, hubs)?;
    emit(format, &analysis, format_removal)
}

pub fn handle_alt_hubs(
    engine: &FlightEngine,
    from: &str,
    to: &str,
    avoid: &str,
    k: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let k = k.unwrap_or(engine.config().default_k_paths);
    let options = engine.find_alternative_hubs(from, to, avoid, k)?;
    emit(format, &options, |found| format_hub_options(found))
}
