use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;

use commands::{cars, check, estimate, route, stations, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rail freight route planning and compliance tools")]
struct Cli {
    /// Load the rail network from a JSON file instead of the built-in map.
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stations on the network.
    Stations,
    /// Find up to three routes between two stations.
    Route(route::RouteArgs),
    /// Rank car types for a piece of freight.
    Cars(cars::CarsArgs),
    /// Run the full compliance check for freight on a route.
    Check(check::CheckArgs),
    /// Estimate cost and transit time for a shipment.
    Estimate(estimate::EstimateArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let network = commands::load_network(cli.network.as_deref())?;

    match cli.command {
        Command::Stations => stations::run(&network, cli.format),
        Command::Route(args) => route::run(&network, &args, cli.format),
        Command::Cars(args) => cars::run(&args, cli.format),
        Command::Check(args) => check::run(&network, &args, cli.format),
        Command::Estimate(args) => estimate::run(&network, &args, cli.format),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
