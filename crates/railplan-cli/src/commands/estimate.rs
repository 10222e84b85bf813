use anyhow::{bail, Result};
use clap::Args;
use serde_json::json;

use railplan_lib::{
    estimate_route_cost, estimate_transit_time, find_routes, RailNetwork, RoutePreferences,
    Season,
};

use super::OutputFormat;

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Origin station code.
    #[arg(long = "from")]
    pub from: String,
    /// Destination station code.
    #[arg(long = "to")]
    pub to: String,
    /// Freight weight in pounds.
    #[arg(long)]
    pub weight: f64,
    #[arg(long, value_enum, default_value = "summer")]
    pub season: SeasonArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SeasonArg {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl From<SeasonArg> for Season {
    fn from(value: SeasonArg) -> Self {
        match value {
            SeasonArg::Winter => Season::Winter,
            SeasonArg::Spring => Season::Spring,
            SeasonArg::Summer => Season::Summer,
            SeasonArg::Fall => Season::Fall,
        }
    }
}

pub fn run(network: &RailNetwork, args: &EstimateArgs, format: OutputFormat) -> Result<()> {
    let routes = find_routes(network, &args.from, &args.to, &RoutePreferences::default())?;
    let Some(route) = routes.first() else {
        bail!("no route found between {} and {}", args.from, args.to);
    };

    let cost = estimate_route_cost(route, args.weight);
    let transit = estimate_transit_time(route, args.season.into());

    match format {
        OutputFormat::Json => {
            let report = json!({
                "route": route,
                "cost": cost,
                "transit": transit,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let names: Vec<&str> = route.stations.iter().map(|s| s.name.as_str()).collect();
            println!("Route: {} ({} mi)", names.join(" -> "), route.total_distance);
            println!(
                "Cost:  ${:.2} (base ${:.2}, transfers ${:.2}, curves ${:.2}, discount -${:.2}, surcharges ${:.2})",
                cost.total_cost,
                cost.base_cost,
                cost.transfer_penalty,
                cost.curve_penalty,
                cost.discount,
                cost.surcharge_total
            );
            println!(
                "Time:  {:.1} h ({:.1} days) in {:?}",
                transit.total_hours,
                transit.total_days(),
                transit.season
            );
        }
    }
    Ok(())
}
