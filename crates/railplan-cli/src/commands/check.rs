use anyhow::{bail, Result};
use clap::Args;
use serde_json::json;

use railplan_lib::{
    analyze_center_of_gravity, best_car, calculate_compliance, find_routes, recommend_cars,
    CarCatalog, Placement, RailNetwork, RoutePreferences,
};

use super::cars::CarsArgs;
use super::OutputFormat;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Origin station code.
    #[arg(long = "from")]
    pub from: String,
    /// Destination station code.
    #[arg(long = "to")]
    pub to: String,
    #[command(flatten)]
    pub freight: CarsArgs,
    /// Specific car id to evaluate instead of the best fit.
    #[arg(long)]
    pub car: Option<String>,
    /// Longitudinal placement offset from car center, in feet.
    #[arg(long, default_value_t = 0.0)]
    pub x_offset: f64,
    /// Lateral placement offset from car center, in feet.
    #[arg(long, default_value_t = 0.0)]
    pub y_offset: f64,
}

pub fn run(network: &RailNetwork, args: &CheckArgs, format: OutputFormat) -> Result<()> {
    let freight = args.freight.freight();
    let preferences = RoutePreferences::default();
    let routes = find_routes(network, &args.from, &args.to, &preferences)?;
    let Some(route) = routes.first() else {
        bail!("no route found between {} and {}", args.from, args.to);
    };

    let route_operators: Vec<_> = route.operators.iter().copied().collect();
    let catalog = CarCatalog::builtin();
    let recommendation = match &args.car {
        Some(id) => {
            let found = route_operators.iter().find_map(|&operator| {
                recommend_cars(&freight, &[operator], &catalog)
                    .into_iter()
                    .find(|rec| &rec.car.id == id)
            });
            match found {
                Some(rec) => rec,
                None => bail!("car '{}' does not fit this freight on the route operators", id),
            }
        }
        None => match best_car(&freight, &route_operators, &catalog) {
            Some(rec) => rec,
            None => bail!("no car on the route operators fits this freight"),
        },
    };

    let placement = Placement {
        x_offset_ft: args.x_offset,
        y_offset_ft: args.y_offset,
    };
    let analysis = analyze_center_of_gravity(&freight, &recommendation.car, placement)?;
    let compliance = calculate_compliance(
        &freight,
        &recommendation.car,
        placement,
        route,
        recommendation.operator,
    );

    match format {
        OutputFormat::Json => {
            let report = json!({
                "route": route,
                "car": recommendation,
                "center_of_gravity": analysis,
                "compliance": compliance,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let names: Vec<&str> = route.stations.iter().map(|s| s.name.as_str()).collect();
            println!("Route: {} ({} mi)", names.join(" -> "), route.total_distance);
            println!(
                "Car:   {} {} ({}), fit score {:.1}",
                recommendation.operator,
                recommendation.car.id,
                recommendation.car.name,
                recommendation.score
            );
            println!(
                "CG:    combined at ({:.1}, {:.1}, {:.1}) ft, placement {}",
                analysis.combined_cg.x,
                analysis.combined_cg.y,
                analysis.combined_cg.z,
                if analysis.validation.is_valid { "valid" } else { "INVALID" }
            );
            println!(
                "Compliance: {}% ({})",
                compliance.probability,
                compliance.category.label()
            );
            for issue in &compliance.critical_issues {
                println!("  critical: {issue}");
            }
            for warning in &compliance.warnings {
                println!("  warning: {warning}");
            }
        }
    }
    Ok(())
}
