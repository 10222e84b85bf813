//! Freight and rail-car data structures.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const METERS_TO_FEET: f64 = 3.28084;
const KILOGRAMS_TO_POUNDS: f64 = 2.20462;

/// Measurement system the freight dimensions were entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

/// A piece of freight to be loaded on a rail car.
///
/// Dimensions are feet and pounds under [`UnitSystem::Imperial`], meters and
/// kilograms under [`UnitSystem::Metric`]. Core calculations always run in
/// imperial; call [`FreightSpec::to_imperial`] at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightSpec {
    pub description: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    pub unit_system: UnitSystem,
}

impl FreightSpec {
    /// Whether every dimension and the weight are positive and finite.
    /// Incomplete freight produces empty downstream results, not errors.
    pub fn is_complete(&self) -> bool {
        [self.length, self.width, self.height, self.weight]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Return an imperial copy of this spec (feet / pounds).
    pub fn to_imperial(&self) -> FreightSpec {
        match self.unit_system {
            UnitSystem::Imperial => self.clone(),
            UnitSystem::Metric => FreightSpec {
                description: self.description.clone(),
                length: self.length * METERS_TO_FEET,
                width: self.width * METERS_TO_FEET,
                height: self.height * METERS_TO_FEET,
                weight: self.weight * KILOGRAMS_TO_POUNDS,
                unit_system: UnitSystem::Imperial,
            },
        }
    }
}

/// A rail car class available from an operator's catalog.
///
/// `height_ft` is usable load height above the deck, not overall car height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarType {
    pub id: String,
    pub name: String,
    pub length_ft: f64,
    pub width_ft: f64,
    pub height_ft: f64,
    pub max_weight_lb: f64,
    pub deck_height_ft: f64,
}

impl CarType {
    /// Validate car data for correctness.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::CarDataValidation {
                message: "car id must not be empty".to_string(),
            });
        }

        let fields = [
            (self.length_ft, "length_ft"),
            (self.width_ft, "width_ft"),
            (self.height_ft, "height_ft"),
            (self.max_weight_lb, "max_weight_lb"),
            (self.deck_height_ft, "deck_height_ft"),
        ];

        for (value, field) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::CarDataValidation {
                    message: format!("{field} must be a finite positive number for car '{}'", self.id),
                });
            }
        }

        Ok(())
    }
}
