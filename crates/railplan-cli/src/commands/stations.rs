use anyhow::Result;

use railplan_lib::RailNetwork;

use super::OutputFormat;

pub fn run(network: &RailNetwork, format: OutputFormat) -> Result<()> {
    let stations = network.stations_sorted();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stations)?);
        }
        OutputFormat::Text => {
            for station in stations {
                println!(
                    "{:5} {} ({}, {})",
                    station.code,
                    station.name,
                    station.region,
                    station.primary_operator
                );
            }
        }
    }
    Ok(())
}
