use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use flightnet_cli::commands::{hubs, load_engine, network, route};
use flightnet_cli::output::OutputFormat;
use flightnet_lib::network::DEFAULT_SEARCH_LIMIT;

#[derive(Parser, Debug)]
#[command(author, version, about = "Flight network route and hub analysis")]
struct Cli {
    /// Directory containing airports.dat and routes.dat (defaults to
    /// FLIGHTNET_DATA_DIR, then ./data).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON file with engine configuration overrides.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show network size and connectivity.
    Stats,
    /// Search airports by name, city, IATA code or country.
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Show details for one airport.
    Airport { iata: String },
    /// Find the optimal route between two airports.
    Route {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Weight to minimise: time, distance or cost.
        #[arg(long, default_value = "time")]
        optimize: String,
        /// Reject the optimal route if it has more stops than this.
        #[arg(long)]
        max_stops: Option<usize>,
    },
    /// List alternative routes in order of increasing weight.
    Alternatives {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        #[arg(long, default_value = "time")]
        optimize: String,
        /// Number of routes (defaults to the configured default_k_paths).
        #[arg(short, long)]
        k: Option<usize>,
    },
    /// Rank airports by a centrality metric.
    TopHubs {
        /// Number of hubs (defaults to the configured top_hubs_count).
        #[arg(short, long)]
        k: Option<usize>,
        /// degree, betweenness, closeness or pagerank.
        #[arg(long, default_value = "degree")]
        metric: String,
    },
    /// Summarise the direct connections of an airport.
    Hub { iata: String },
    /// Compare the fastest route before and after removing hubs.
    RemoveHubs {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Comma-separated hub codes to remove.
        #[arg(long, value_delimiter = ',', required = true)]
        remove: Vec<String>,
    },
    /// List one-stop alternatives avoiding a primary hub.
    AltHubs {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Primary hub to exclude.
        #[arg(long)]
        avoid: String,
        #[arg(short, long)]
        k: Option<usize>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let engine = load_engine(cli.data_dir.as_deref(), cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Command::Stats => network::handle_stats(&engine, format),
        Command::Search { query, limit } => network::handle_search(&engine, &query, limit, format),
        Command::Airport { iata } => network::handle_airport(&engine, &iata, format),
        Command::Route {
            from,
            to,
            optimize,
            max_stops,
        } => route::handle_route(&engine, &from, &to, &optimize, max_stops, format),
        Command::Alternatives {
            from,
            to,
            optimize,
            k,
        } => route::handle_alternatives(&engine, &from, &to, &optimize, k, format),
        Command::TopHubs { k, metric } => hubs::handle_top_hubs(&engine, k, &metric, format),
        Command::Hub { iata } => hubs::handle_hub(&engine, &iata, format),
        Command::RemoveHubs { from, to, remove } => {
            hubs::handle_remove_hubs(&engine, &from, &to, &remove, format)
        }
        Command::AltHubs { from, to, avoid, k } => {
            hubs::handle_alt_hubs(&engine, &from, &to, &avoid, k, format)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
