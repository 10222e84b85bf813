use anyhow::Result;
use clap::Args;

use railplan_lib::{recommend_cars, CarCatalog, FreightSpec, Operator, UnitSystem};

use super::{parse_operators, OutputFormat};

#[derive(Args, Debug)]
pub struct CarsArgs {
    #[arg(long)]
    pub length: f64,
    #[arg(long)]
    pub width: f64,
    #[arg(long)]
    pub height: f64,
    #[arg(long)]
    pub weight: f64,
    /// Interpret dimensions as meters and kilograms.
    #[arg(long)]
    pub metric: bool,
    /// Comma-separated operators to consider (default: all).
    #[arg(long)]
    pub operators: Option<String>,
    #[arg(long, default_value = "freight")]
    pub description: String,
}

impl CarsArgs {
    pub fn freight(&self) -> FreightSpec {
        FreightSpec {
            description: self.description.clone(),
            length: self.length,
            width: self.width,
            height: self.height,
            weight: self.weight,
            unit_system: if self.metric {
                UnitSystem::Metric
            } else {
                UnitSystem::Imperial
            },
        }
    }

    pub fn operator_list(&self) -> Result<Vec<Operator>> {
        match &self.operators {
            Some(value) => parse_operators(value),
            None => Ok(Operator::ALL.to_vec()),
        }
    }
}

pub fn run(args: &CarsArgs, format: OutputFormat) -> Result<()> {
    let freight = args.freight();
    let operators = args.operator_list()?;
    let catalog = CarCatalog::builtin();
    let recommendations = recommend_cars(&freight, &operators, &catalog);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recommendations)?),
        OutputFormat::Text => {
            if recommendations.is_empty() {
                println!("No car fits this freight.");
                return Ok(());
            }
            for rec in &recommendations {
                let marker = if rec.is_perfect_fit { " (perfect fit)" } else { "" };
                println!(
                    "{:5} {:10} {:30} score {:5.1}{}",
                    rec.operator, rec.car.id, rec.car.name, rec.score, marker
                );
            }
        }
    }
    Ok(())
}
