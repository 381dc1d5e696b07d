//! Output formatting for command results.
//!
//! Every command result is `Serialize`, so JSON output is a straight dump.
//! The text formatters return strings rather than printing so they can be
//! tested without capturing stdout.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use flightnet_lib::{
    Airport, CentralityMetric, CentralityRecord, ConnectivitySummary, HubOption, NetworkStats,
    PathResult, RemovalAnalysis,
};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Print `value` as JSON, or as the text produced by `render`.
pub fn emit<T, F>(format: OutputFormat, value: &T, render: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", render(value)),
    }
    Ok(())
}

fn hours(value: f64) -> String {
    let minutes = (value * 60.0).round() as i64;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Join rendered lines, each terminated by a newline.
fn block(lines: Vec<String>) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

pub fn format_stats(stats: &NetworkStats) -> String {
    block(vec![
        format!("Airports:    {}", stats.num_airports),
        format!("Routes:      {}", stats.num_routes),
        format!("Avg degree:  {:.2}", stats.avg_degree),
        format!(
            "Connected:   {} ({} component{})",
            if stats.is_connected { "yes" } else { "no" },
            stats.num_components,
            plural(stats.num_components)
        ),
    ])
}

pub fn format_airport(airport: &Airport) -> String {
    block(vec![
        format!("{} - {}", airport.iata, airport.name),
        format!("  {}, {}", airport.city, airport.country),
        format!(
            "  lat {:.4}, lon {:.4}, alt {:.0}ft",
            airport.latitude, airport.longitude, airport.altitude
        ),
    ])
}

pub fn format_airport_list(airports: &[&Airport]) -> String {
    if airports.is_empty() {
        return "No matching airports.\n".to_string();
    }
    block(
        airports
            .iter()
            .map(|airport| {
                format!(
                    "{:<4} {} ({}, {})",
                    airport.iata, airport.name, airport.city, airport.country
                )
            })
            .collect(),
    )
}

pub fn format_route(route: &PathResult) -> String {
    let mut lines = vec![format!(
        "Route {} ({} stop{}):",
        route.path.join(" -> "),
        route.stops,
        plural(route.stops)
    )];
    lines.extend(route.segments.iter().map(|segment| {
        format!(
            "  {} -> {}  {:>9.2} km  {}  {:>8.2}  [{}]",
            segment.from,
            segment.to,
            segment.distance,
            hours(segment.time),
            segment.cost,
            segment.airline
        )
    }));
    lines.push(format!("Total distance: {:.2} km", route.total_distance));
    lines.push(format!(
        "Total time:     {} (flight {}, transfers {})",
        hours(route.total_time),
        hours(route.total_flight_time),
        hours(route.total_transfer_time)
    ));
    lines.push(format!("Total cost:     {:.2}", route.total_cost));
    block(lines)
}

pub fn format_routes(routes: &[PathResult]) -> String {
    if routes.is_empty() {
        return "No routes found.\n".to_string();
    }
    routes
        .iter()
        .enumerate()
        .map(|(idx, route)| format!("#{}\n{}", idx + 1, format_route(route)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_hubs(hubs: &[CentralityRecord], metric: CentralityMetric) -> String {
    let mut lines = vec![format!(
        "{:>3}  {:<4} {:>12}  {:>6}  Name",
        "#",
        "IATA",
        metric.as_str(),
        "Degree"
    )];
    lines.extend(hubs.iter().enumerate().map(|(rank, hub)| {
        format!(
            "{:>3}  {:<4} {:>12.6}  {:>6}  {} ({})",
            rank + 1,
            hub.iata,
            metric.value(hub),
            hub.total_degree,
            hub.name,
            hub.country
        )
    }));
    block(lines)
}

pub fn format_connectivity(summary: &ConnectivitySummary) -> String {
    block(vec![
        format!(
            "{} - {} ({}, {})",
            summary.iata, summary.name, summary.city, summary.country
        ),
        format!("  Destinations:      {}", summary.num_destinations),
        format!("  Origins:           {}", summary.num_origins),
        format!("  Connected airports: {}", summary.total_connections),
        format!("  Countries served:  {}", summary.countries_served),
        format!("  Destinations: {}", summary.top_destinations.join(", ")),
        format!("  Origins:      {}", summary.top_origins.join(", ")),
    ])
}

fn format_removal_leg(label: &str, route: Option<&PathResult>) -> String {
    match route {
        Some(route) => format!("\n{label}:\n{}", format_route(route)),
        None => format!("\n{label}: no route\n"),
    }
}

pub fn format_removal(analysis: &RemovalAnalysis) -> String {
    let mut out = format!("Removed hubs: {}\n", analysis.removed_hubs.join(", "));
    out += &format_removal_leg("Original", analysis.original_path.as_ref());
    out += &format_removal_leg("Without removed hubs", analysis.alternative_path.as_ref());
    if let (Some(time), Some(distance), Some(cost), Some(stops)) = (
        analysis.time_increase,
        analysis.distance_increase,
        analysis.cost_increase,
        analysis.stops_increase,
    ) {
        out += &format!(
            "\nImpact: {time:+.2} h, {distance:+.2} km, {cost:+.2} cost, {stops:+} stops\n"
        );
    }
    out
}

pub fn format_hub_options(options: &[HubOption]) -> String {
    if options.is_empty() {
        return "No alternative hubs.\n".to_string();
    }
    block(
        options
            .iter()
            .map(|option| {
                format!(
                    "{:<4} {:<40} {}  {:>9.2} km  {:>8.2}  {}",
                    option.hub,
                    format!("{} ({})", option.hub_city, option.hub_country),
                    hours(option.total_time),
                    option.total_distance,
                    option.total_cost,
                    if option.is_international_transfer {
                        "international"
                    } else {
                        "domestic"
                    }
                )
            })
            .collect(),
    )
}
