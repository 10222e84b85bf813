use anyhow::Result;
use clap::Args;

use railplan_lib::{find_routes, RailNetwork, Route, RoutePreferences};

use super::{parse_operators, OutputFormat};

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Origin station code.
    #[arg(long = "from")]
    pub from: String,
    /// Destination station code.
    #[arg(long = "to")]
    pub to: String,
    /// Maximum stations beyond the origin.
    #[arg(long, default_value_t = 5)]
    pub max_transfers: usize,
    #[arg(long, default_value_t = 1.0)]
    pub weight_distance: f64,
    #[arg(long, default_value_t = 0.5)]
    pub weight_single_operator: f64,
    #[arg(long, default_value_t = 0.3)]
    pub weight_curves: f64,
    /// Comma-separated operators that must carry every segment.
    #[arg(long)]
    pub require: Option<String>,
    /// Comma-separated operators to avoid entirely.
    #[arg(long)]
    pub avoid: Option<String>,
}

impl RouteArgs {
    pub fn preferences(&self) -> Result<RoutePreferences> {
        let mut preferences = RoutePreferences {
            weight_distance: self.weight_distance,
            weight_single_operator: self.weight_single_operator,
            weight_curves: self.weight_curves,
            max_transfers: self.max_transfers,
            ..RoutePreferences::default()
        };
        if let Some(require) = &self.require {
            preferences.require_operators = parse_operators(require)?.into_iter().collect();
        }
        if let Some(avoid) = &self.avoid {
            preferences.avoid_operators = parse_operators(avoid)?.into_iter().collect();
        }
        Ok(preferences)
    }
}

pub fn run(network: &RailNetwork, args: &RouteArgs, format: OutputFormat) -> Result<()> {
    let preferences = args.preferences()?;
    let routes = find_routes(network, &args.from, &args.to, &preferences)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&routes)?),
        OutputFormat::Text => {
            if routes.is_empty() {
                println!("No route found between {} and {}.", args.from, args.to);
                return Ok(());
            }
            for (index, route) in routes.iter().enumerate() {
                print_route(index + 1, route);
            }
        }
    }
    Ok(())
}

fn print_route(rank: usize, route: &Route) {
    let names: Vec<&str> = route.stations.iter().map(|s| s.name.as_str()).collect();
    println!(
        "{}. {} ({} mi, {} operator(s), {} transfer(s))",
        rank,
        names.join(" -> "),
        route.total_distance,
        route.operator_count,
        route.transfer_count()
    );
    for segment in &route.segments {
        println!(
            "     {} -> {}: {} mi on {}",
            segment.from, segment.to, segment.distance_miles, segment.operator
        );
    }
    for transfer in &route.transfer_points {
        println!(
            "     transfer at {}: {} -> {}",
            transfer.station, transfer.from_operator, transfer.to_operator
        );
    }
}
