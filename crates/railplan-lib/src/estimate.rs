//! Linear cost and transit-time models over a finalized route.
//!
//! Both estimators are pure functions of the route and their scalar inputs;
//! a route with no segments yields a zeroed estimate rather than an error.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::network::Operator;
use crate::route::Route;

const POUNDS_PER_TON: f64 = 2000.0;
const TRANSFER_COST_USD: f64 = 500.0;
const CURVE_COST_USD: f64 = 10.0;
const TRANSFER_DWELL_HOURS: f64 = 12.0;
const CURVE_SLOWDOWN_HOURS: f64 = 0.5;

/// Line-haul rate in dollars per ton-mile.
pub fn operator_rate(operator: Operator) -> f64 {
    match operator {
        Operator::Bnsf => 0.045,
        Operator::UnionPacific => 0.042,
        Operator::Csx => 0.048,
        Operator::NorfolkSouthern => 0.047,
        Operator::CanadianNational => 0.040,
        Operator::CanadianPacific => 0.041,
        Operator::KansasCitySouthern => 0.050,
    }
}

/// Average network speed in miles per hour.
pub fn operator_speed(operator: Operator) -> f64 {
    match operator {
        Operator::Bnsf => 24.0,
        Operator::UnionPacific => 23.0,
        Operator::Csx => 21.0,
        Operator::NorfolkSouthern => 22.0,
        Operator::CanadianNational => 25.0,
        Operator::CanadianPacific => 24.0,
        Operator::KansasCitySouthern => 20.0,
    }
}

/// Fuel/interchange surcharge rate applied to an operator's subtotal.
fn operator_surcharge_rate(operator: Operator) -> f64 {
    match operator {
        Operator::CanadianNational | Operator::CanadianPacific => 0.02,
        Operator::KansasCitySouthern => 0.05,
        _ => 0.0,
    }
}

/// Volume discount applied to the base cost, bracketed by route distance.
fn distance_discount_rate(total_distance_miles: f64) -> f64 {
    if total_distance_miles >= 1000.0 {
        0.15
    } else if total_distance_miles >= 500.0 {
        0.10
    } else if total_distance_miles >= 100.0 {
        0.05
    } else {
        0.0
    }
}

/// Long hauls sustain higher average speeds.
fn distance_speed_bonus(total_distance_miles: f64) -> f64 {
    if total_distance_miles >= 1000.0 {
        0.10
    } else if total_distance_miles >= 500.0 {
        0.05
    } else {
        0.0
    }
}

/// Shipping season, supplied by the caller; the core never consults a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    #[default]
    Summer,
    Fall,
}

impl Season {
    /// Transit-time inflation for the season.
    pub fn multiplier(&self) -> f64 {
        match self {
            Season::Winter => 1.15,
            Season::Spring | Season::Fall => 1.05,
            Season::Summer => 1.0,
        }
    }
}

/// Cost estimate with its component lines.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CostEstimate {
    pub total_cost: f64,
    pub base_cost: f64,
    pub transfer_penalty: f64,
    pub curve_penalty: f64,
    pub discount: f64,
    pub discount_rate: f64,
    pub surcharge_total: f64,
    pub operator_subtotals: BTreeMap<Operator, f64>,
}

/// Transit-time estimate with its component lines.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransitEstimate {
    pub total_hours: f64,
    pub segment_hours: f64,
    pub transfer_hours: f64,
    pub curve_hours: f64,
    pub season: Season,
    pub season_multiplier: f64,
}

impl TransitEstimate {
    pub fn total_days(&self) -> f64 {
        self.total_hours / 24.0
    }
}

/// Estimate the shipping cost for hauling `weight_lb` over the route.
pub fn estimate_route_cost(route: &Route, weight_lb: f64) -> CostEstimate {
    if route.segments.is_empty() {
        return CostEstimate::default();
    }

    let weight_tons = weight_lb / POUNDS_PER_TON;
    let mut operator_subtotals: BTreeMap<Operator, f64> = BTreeMap::new();
    let mut base_cost = 0.0;

    for segment in &route.segments {
        let subtotal = segment.distance_miles * operator_rate(segment.operator) * weight_tons;
        base_cost += subtotal;
        *operator_subtotals.entry(segment.operator).or_insert(0.0) += subtotal;
    }

    let transfer_penalty = route.transfer_count() as f64 * TRANSFER_COST_USD;
    let curve_penalty = route.total_curve_score * CURVE_COST_USD;
    let discount_rate = distance_discount_rate(route.total_distance);
    let discount = base_cost * discount_rate;
    let surcharge_total: f64 = operator_subtotals
        .iter()
        .map(|(operator, subtotal)| subtotal * operator_surcharge_rate(*operator))
        .sum();

    CostEstimate {
        total_cost: base_cost + transfer_penalty + curve_penalty - discount + surcharge_total,
        base_cost,
        transfer_penalty,
        curve_penalty,
        discount,
        discount_rate,
        surcharge_total,
        operator_subtotals,
    }
}

/// Estimate door-to-door transit time for the route in the given season.
pub fn estimate_transit_time(route: &Route, season: Season) -> TransitEstimate {
    if route.segments.is_empty() {
        return TransitEstimate {
            season,
            season_multiplier: season.multiplier(),
            ..TransitEstimate::default()
        };
    }

    let speed_bonus = distance_speed_bonus(route.total_distance);
    let segment_hours: f64 = route
        .segments
        .iter()
        .map(|segment| {
            segment.distance_miles / (operator_speed(segment.operator) * (1.0 + speed_bonus))
        })
        .sum();
    let transfer_hours = route.transfer_count() as f64 * TRANSFER_DWELL_HOURS;
    let curve_hours = route.total_curve_score * CURVE_SLOWDOWN_HOURS;
    let season_multiplier = season.multiplier();

    TransitEstimate {
        total_hours: (segment_hours + transfer_hours + curve_hours) * season_multiplier,
        segment_hours,
        transfer_hours,
        curve_hours,
        season,
        season_multiplier,
    }
}
