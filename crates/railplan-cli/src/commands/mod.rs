use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use railplan_lib::{Operator, RailNetwork};

pub mod cars;
pub mod check;
pub mod estimate;
pub mod route;
pub mod stations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Load the network from a dataset file, or fall back to the built-in map.
pub fn load_network(path: Option<&Path>) -> Result<RailNetwork> {
    match path {
        Some(path) => RailNetwork::from_path(path)
            .with_context(|| format!("failed to load network from {}", path.display())),
        None => Ok(RailNetwork::north_america().clone()),
    }
}

/// Parse a comma-separated operator list, e.g. `BNSF,UP`.
pub fn parse_operators(value: &str) -> Result<Vec<Operator>> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.parse::<Operator>()
                .with_context(|| format!("invalid operator '{part}'"))
        })
        .collect()
}
