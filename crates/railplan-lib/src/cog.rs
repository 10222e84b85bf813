//! Combined center-of-gravity calculation and placement validation.
//!
//! Axes: x is longitudinal from car center (positive toward the far end),
//! y is lateral from car centerline, z is vertical above the rail.

use serde::Serialize;

use crate::car::{CarType, FreightSpec};
use crate::error::{Error, Result};

/// Fixed empty (tare) weight used for every car class. A modeling
/// assumption carried from the source system: real tare varies by class,
/// but the stability thresholds are calibrated against this constant.
pub const CAR_EMPTY_WEIGHT_LB: f64 = 60_000.0;

/// Longitudinal CG offset warning threshold, as a fraction of car length.
pub(crate) const LONGITUDINAL_OFFSET_LIMIT: f64 = 0.10;
/// Lateral CG offset warning threshold, as a fraction of car width.
pub(crate) const LATERAL_OFFSET_LIMIT: f64 = 0.05;
/// Combined CG must stay this many feet below the car's top clearance.
pub(crate) const VERTICAL_CLEARANCE_FT: f64 = 2.0;

/// Where the freight sits on the deck, measured from the car center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Placement {
    pub x_offset_ft: f64,
    pub y_offset_ft: f64,
}

/// A point in car-local coordinates, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CgPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Outcome of placement validation.
///
/// Issues are hard violations (load does not belong on this car at this
/// placement); warnings flag stability concerns that need review.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

/// Full center-of-gravity analysis for a freight/car/placement triple.
#[derive(Debug, Clone, Serialize)]
pub struct CgAnalysis {
    pub freight_cg: CgPoint,
    pub car_cg: CgPoint,
    pub combined_cg: CgPoint,
    pub validation: PlacementValidation,
    pub total_weight_lb: f64,
    pub car_weight_lb: f64,
    pub freight_weight_lb: f64,
}

/// Compute the combined (car + freight) center of gravity and validate the
/// placement.
///
/// The combined CG is the mass-weighted average of the car CG (assumed at
/// the geometric center) and the freight CG. Validation runs as a second
/// pass over the already-derived combined CG; it never recomputes it.
pub fn analyze_center_of_gravity(
    freight: &FreightSpec,
    car: &CarType,
    placement: Placement,
) -> Result<CgAnalysis> {
    car.validate()?;
    let freight = freight.to_imperial();
    if !freight.is_complete() {
        return Err(Error::CarDataValidation {
            message: "freight dimensions and weight must be positive for CG analysis".to_string(),
        });
    }
    if !placement.x_offset_ft.is_finite() || !placement.y_offset_ft.is_finite() {
        return Err(Error::CarDataValidation {
            message: "placement offsets must be finite".to_string(),
        });
    }

    let car_weight_lb = CAR_EMPTY_WEIGHT_LB;
    let freight_weight_lb = freight.weight;
    let total_weight_lb = car_weight_lb + freight_weight_lb;

    let freight_cg = CgPoint {
        x: placement.x_offset_ft,
        y: placement.y_offset_ft,
        z: car.deck_height_ft + freight.height / 2.0,
    };
    let car_cg = CgPoint {
        x: 0.0,
        y: 0.0,
        z: car.deck_height_ft + car.height_ft / 2.0,
    };

    let blend = |car_axis: f64, freight_axis: f64| {
        (car_axis * car_weight_lb + freight_axis * freight_weight_lb) / total_weight_lb
    };
    let combined_cg = CgPoint {
        x: blend(car_cg.x, freight_cg.x),
        y: blend(car_cg.y, freight_cg.y),
        z: blend(car_cg.z, freight_cg.z),
    };

    let validation = validate_placement(&freight, car, placement, &combined_cg);

    Ok(CgAnalysis {
        freight_cg,
        car_cg,
        combined_cg,
        validation,
        total_weight_lb,
        car_weight_lb,
        freight_weight_lb,
    })
}

fn validate_placement(
    freight: &FreightSpec,
    car: &CarType,
    placement: Placement,
    combined_cg: &CgPoint,
) -> PlacementValidation {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if freight.length > car.length_ft {
        issues.push(format!(
            "freight length {:.1} ft exceeds car length {:.1} ft",
            freight.length, car.length_ft
        ));
    }
    if freight.width > car.width_ft {
        issues.push(format!(
            "freight width {:.1} ft exceeds car width {:.1} ft",
            freight.width, car.width_ft
        ));
    }
    if freight.height > car.height_ft {
        issues.push(format!(
            "freight height {:.1} ft exceeds usable car height {:.1} ft",
            freight.height, car.height_ft
        ));
    }
    if freight.weight > car.max_weight_lb {
        issues.push(format!(
            "freight weight {:.0} lb exceeds car capacity {:.0} lb",
            freight.weight, car.max_weight_lb
        ));
    }
    if placement.x_offset_ft.abs() + freight.length / 2.0 > car.length_ft / 2.0 {
        issues.push("freight overhangs the car end at this longitudinal offset".to_string());
    }
    if placement.y_offset_ft.abs() + freight.width / 2.0 > car.width_ft / 2.0 {
        issues.push("freight overhangs the car side at this lateral offset".to_string());
    }

    if combined_cg.x.abs() > LONGITUDINAL_OFFSET_LIMIT * car.length_ft {
        warnings.push(format!(
            "combined CG is {:.1} ft off car center longitudinally (limit {:.1} ft)",
            combined_cg.x,
            LONGITUDINAL_OFFSET_LIMIT * car.length_ft
        ));
    }
    if combined_cg.y.abs() > LATERAL_OFFSET_LIMIT * car.width_ft {
        warnings.push(format!(
            "combined CG is {:.1} ft off car centerline laterally (limit {:.1} ft)",
            combined_cg.y,
            LATERAL_OFFSET_LIMIT * car.width_ft
        ));
    }
    let max_cg_height = car.height_ft + car.deck_height_ft - VERTICAL_CLEARANCE_FT;
    if combined_cg.z > max_cg_height {
        warnings.push(format!(
            "combined CG height {:.1} ft exceeds stable limit {:.1} ft",
            combined_cg.z, max_cg_height
        ));
    }

    PlacementValidation {
        is_valid: issues.is_empty(),
        issues,
        warnings,
    }
}
