//! Car catalog loading and per-operator fleet lookup.
//!
//! Operators expose fixed catalogs of car classes. An operator with no
//! bespoke fleet falls back to a shared default fleet; this mirrors the
//! source system's documented behavior rather than treating it as an error.

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use once_cell::sync::Lazy;
use tracing::warn;

use crate::error::{Error, Result};
use crate::network::Operator;

use super::types::CarType;

fn car(
    id: &str,
    name: &str,
    length_ft: f64,
    width_ft: f64,
    height_ft: f64,
    max_weight_lb: f64,
    deck_height_ft: f64,
) -> CarType {
    CarType {
        id: id.to_string(),
        name: name.to_string(),
        length_ft,
        width_ft,
        height_ft,
        max_weight_lb,
        deck_height_ft,
    }
}

fn flat_89() -> CarType {
    car("flat-89", "89' General Service Flatcar", 89.0, 10.5, 15.0, 178_000.0, 3.9)
}

fn flat_60hd() -> CarType {
    car("flat-60hd", "60' Heavy-Duty Flatcar", 60.0, 10.0, 15.0, 400_000.0, 4.0)
}

fn box_60() -> CarType {
    car("box-60", "60' Hi-Roof Boxcar", 60.0, 9.5, 13.0, 220_000.0, 3.5)
}

fn box_50() -> CarType {
    car("box-50", "50' Standard Boxcar", 50.5, 9.5, 11.0, 200_000.0, 3.5)
}

fn gon_65() -> CarType {
    car("gon-65", "65' Mill Gondola", 65.5, 9.5, 12.0, 220_000.0, 3.0)
}

fn center_beam_73() -> CarType {
    car("cb-73", "73' Center-Beam Flatcar", 73.0, 10.0, 14.0, 190_000.0, 4.0)
}

fn well_53() -> CarType {
    car("well-53", "53' Well Car", 53.0, 8.5, 16.0, 220_000.0, 2.0)
}

/// Shared fleet used for operators without a bespoke catalog entry.
static DEFAULT_FLEET: Lazy<Vec<CarType>> =
    Lazy::new(|| vec![box_60(), flat_89(), gon_65()]);

/// Per-operator catalogs of available car classes.
#[derive(Debug, Clone, Default)]
pub struct CarCatalog {
    fleets: HashMap<Operator, Vec<CarType>>,
}

impl CarCatalog {
    /// Built-in catalog covering every modeled operator.
    pub fn builtin() -> Self {
        let mut fleets = HashMap::new();
        fleets.insert(
            Operator::Bnsf,
            vec![flat_89(), flat_60hd(), box_60(), well_53()],
        );
        fleets.insert(
            Operator::UnionPacific,
            vec![flat_89(), box_60(), gon_65(), center_beam_73()],
        );
        fleets.insert(Operator::Csx, vec![box_50(), gon_65(), flat_89()]);
        fleets.insert(
            Operator::NorfolkSouthern,
            vec![box_60(), box_50(), center_beam_73()],
        );
        fleets.insert(
            Operator::CanadianNational,
            vec![box_60(), gon_65(), well_53()],
        );
        fleets.insert(
            Operator::CanadianPacific,
            vec![box_50(), center_beam_73(), flat_89()],
        );
        fleets.insert(Operator::KansasCitySouthern, vec![box_50(), gon_65()]);
        Self { fleets }
    }

    /// Load a catalog from CSV with columns
    /// `operator,id,name,length_ft,width_ft,height_ft,max_weight_lb,deck_height_ft`.
    ///
    /// Rows that fail to parse or validate are skipped with a warning so one
    /// bad car never blocks the rest of the catalog.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::CarDataValidation {
                message: format!("failed to read car catalog headers: {err}"),
            })?
            .clone();

        let normalize = |s: &str| {
            s.to_ascii_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        };
        let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();

        let index_of = |field: &str| -> Result<usize> {
            normalized
                .iter()
                .position(|h| h.as_str() == field)
                .ok_or_else(|| Error::CarDataValidation {
                    message: format!("car catalog missing required column '{field}'"),
                })
        };

        let operator_idx = index_of("operator")?;
        let id_idx = index_of("id")?;
        let name_idx = index_of("name")?;
        let length_idx = index_of("length_ft")?;
        let width_idx = index_of("width_ft")?;
        let height_idx = index_of("height_ft")?;
        let weight_idx = index_of("max_weight_lb")?;
        let deck_idx = index_of("deck_height_ft")?;

        let mut fleets: HashMap<Operator, Vec<CarType>> = HashMap::new();
        let mut row_num: usize = 1;

        for record in csv_reader.records() {
            row_num += 1;
            let record = record.map_err(|e| Error::CarDataValidation {
                message: format!("car catalog row {row_num}: {e}"),
            })?;

            let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
            let numeric = |idx: usize| field(idx).parse::<f64>();

            let operator = match field(operator_idx).parse::<Operator>() {
                Ok(op) => op,
                Err(err) => {
                    warn!(row = row_num, %err, "skipping catalog row with unknown operator");
                    continue;
                }
            };

            let parsed = (
                numeric(length_idx),
                numeric(width_idx),
                numeric(height_idx),
                numeric(weight_idx),
                numeric(deck_idx),
            );
            let (Ok(length_ft), Ok(width_ft), Ok(height_ft), Ok(max_weight_lb), Ok(deck_height_ft)) =
                parsed
            else {
                warn!(row = row_num, "skipping catalog row with non-numeric dimensions");
                continue;
            };

            let entry = CarType {
                id: field(id_idx),
                name: field(name_idx),
                length_ft,
                width_ft,
                height_ft,
                max_weight_lb,
                deck_height_ft,
            };

            if let Err(err) = entry.validate() {
                warn!(row = row_num, %err, "skipping invalid catalog row");
                continue;
            }

            let fleet = fleets.entry(operator).or_default();
            if fleet.iter().any(|existing| existing.id == entry.id) {
                return Err(Error::DuplicateCarId {
                    operator: operator.to_string(),
                    id: entry.id,
                });
            }
            fleet.push(entry);
        }

        Ok(Self { fleets })
    }

    /// Fleet available from an operator, falling back to the default fleet
    /// for operators without a bespoke catalog.
    pub fn fleet_for(&self, operator: Operator) -> &[CarType] {
        self.fleets
            .get(&operator)
            .map(Vec::as_slice)
            .unwrap_or_else(|| DEFAULT_FLEET.as_slice())
    }

    /// Find a specific car class in an operator's fleet.
    pub fn find(&self, operator: Operator, id: &str) -> Option<&CarType> {
        self.fleet_for(operator).iter().find(|c| c.id == id)
    }
}
