//! Freight-to-car fit scoring and ranking.

use serde::Serialize;
use tracing::warn;

use crate::network::Operator;

use super::catalog::CarCatalog;
use super::types::{CarType, FreightSpec};

/// Utilization on every axis, as fractions of car capacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitUtilization {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

/// A scored car candidate for a piece of freight.
#[derive(Debug, Clone, Serialize)]
pub struct CarRecommendation {
    pub operator: Operator,
    pub car: CarType,
    /// Fit score in `[0, 100]`, higher is better.
    pub score: f64,
    pub is_perfect_fit: bool,
    pub utilization: FitUtilization,
}

/// Weight on the binding (lowest-utilization) dimension in the fit score.
/// Keeping this dominant guarantees a snug all-axis fit always outranks a
/// car with large slack on any single axis.
const DIMENSION_SCORE_WEIGHT: f64 = 75.0;
const WEIGHT_SCORE_WEIGHT: f64 = 25.0;

/// Utilization band for a perfect fit: every dimension within 10% slack and
/// weight no higher than 90% of capacity.
const PERFECT_FIT_MIN_DIMENSION_UTILIZATION: f64 = 0.90;
const PERFECT_FIT_MAX_WEIGHT_UTILIZATION: f64 = 0.90;

/// Score every available car across the given operators' fleets, best-first.
///
/// Freight with any non-positive dimension or weight yields an empty list.
/// Cars the freight physically exceeds on any axis are excluded outright,
/// never merely penalized. Malformed catalog entries are skipped so they
/// cannot block the rest of the fleet.
pub fn recommend_cars(
    freight: &FreightSpec,
    operators: &[Operator],
    catalog: &CarCatalog,
) -> Vec<CarRecommendation> {
    if !freight.is_complete() {
        return Vec::new();
    }
    let freight = freight.to_imperial();

    let mut recommendations = Vec::new();
    for &operator in operators {
        for car in catalog.fleet_for(operator) {
            if let Err(err) = car.validate() {
                warn!(operator = %operator, %err, "skipping malformed catalog car");
                continue;
            }
            if let Some(recommendation) = score_candidate(&freight, operator, car) {
                recommendations.push(recommendation);
            }
        }
    }

    recommendations.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.operator.mark().cmp(b.operator.mark()))
            .then_with(|| a.car.id.cmp(&b.car.id))
    });
    recommendations
}

/// Best single candidate across the given operators, if any car fits.
pub fn best_car(
    freight: &FreightSpec,
    operators: &[Operator],
    catalog: &CarCatalog,
) -> Option<CarRecommendation> {
    recommend_cars(freight, operators, catalog).into_iter().next()
}

fn score_candidate(
    freight: &FreightSpec,
    operator: Operator,
    car: &CarType,
) -> Option<CarRecommendation> {
    // Hard constraints: any exceeded axis disqualifies the car.
    if freight.length > car.length_ft
        || freight.width > car.width_ft
        || freight.height > car.height_ft
        || freight.weight > car.max_weight_lb
    {
        return None;
    }

    let utilization = FitUtilization {
        length: freight.length / car.length_ft,
        width: freight.width / car.width_ft,
        height: freight.height / car.height_ft,
        weight: freight.weight / car.max_weight_lb,
    };

    let binding_dimension = utilization
        .length
        .min(utilization.width)
        .min(utilization.height);
    let score = (DIMENSION_SCORE_WEIGHT * binding_dimension
        + WEIGHT_SCORE_WEIGHT * utilization.weight)
        .clamp(0.0, 100.0);

    let is_perfect_fit = utilization.length >= PERFECT_FIT_MIN_DIMENSION_UTILIZATION
        && utilization.width >= PERFECT_FIT_MIN_DIMENSION_UTILIZATION
        && utilization.height >= PERFECT_FIT_MIN_DIMENSION_UTILIZATION
        && utilization.weight <= PERFECT_FIT_MAX_WEIGHT_UTILIZATION;

    Some(CarRecommendation {
        operator,
        car: car.clone(),
        score,
        is_perfect_fit,
        utilization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::UnitSystem;

    fn freight(length: f64, width: f64, height: f64, weight: f64) -> FreightSpec {
        FreightSpec {
            description: "test load".to_string(),
            length,
            width,
            height,
            weight,
            unit_system: UnitSystem::Imperial,
        }
    }

    fn car(id: &str, length: f64, width: f64, height: f64, max_weight: f64) -> CarType {
        CarType {
            id: id.to_string(),
            name: id.to_string(),
            length_ft: length,
            width_ft: width,
            height_ft: height,
            max_weight_lb: max_weight,
            deck_height_ft: 4.0,
        }
    }

    #[test]
    fn incomplete_freight_yields_nothing() {
        let catalog = CarCatalog::builtin();
        let operators = [Operator::Bnsf];
        assert!(recommend_cars(&freight(0.0, 8.0, 10.0, 50_000.0), &operators, &catalog)
            .is_empty());
        assert!(best_car(&freight(40.0, 8.0, 10.0, 0.0), &operators, &catalog).is_none());
    }

    #[test]
    fn oversized_freight_never_matches() {
        let oversized = freight(95.0, 8.0, 10.0, 50_000.0);
        let catalog = CarCatalog::builtin();
        let recommendations =
            recommend_cars(&oversized, &[Operator::Bnsf], &catalog);
        // Longest BNSF car is the 89' flatcar.
        assert!(recommendations.is_empty());
    }

    #[test]
    fn overweight_freight_never_matches() {
        let heavy = freight(40.0, 8.0, 10.0, 500_000.0);
        let catalog = CarCatalog::builtin();
        assert!(recommend_cars(&heavy, &[Operator::Bnsf], &catalog).is_empty());
    }

    #[test]
    fn snug_fit_outranks_loose_fit() {
        let spec = freight(57.0, 9.2, 12.5, 95_000.0);
        let snug = car("snug", 60.0, 9.5, 13.0, 110_000.0);
        let loose = car("loose", 120.0, 9.5, 13.0, 110_000.0);

        let snug_rec = score_candidate(&spec, Operator::Bnsf, &snug).unwrap();
        let loose_rec = score_candidate(&spec, Operator::Bnsf, &loose).unwrap();
        assert!(snug_rec.score > loose_rec.score);
        assert!(snug_rec.is_perfect_fit);
        assert!(!loose_rec.is_perfect_fit);
    }

    #[test]
    fn tight_all_axis_fit_beats_half_empty_car_regardless_of_weight() {
        // Under 5% slack everywhere, weight under 95%.
        let spec = freight(57.5, 9.2, 12.5, 20_000.0);
        let tight = car("tight", 60.0, 9.5, 13.0, 220_000.0);
        // Over 50% slack on length.
        let hollow = car("hollow", 120.0, 9.5, 13.0, 20_500.0);

        let tight_rec = score_candidate(&spec, Operator::Bnsf, &tight).unwrap();
        let hollow_rec = score_candidate(&spec, Operator::Bnsf, &hollow).unwrap();
        assert!(tight_rec.score > hollow_rec.score);
    }

    #[test]
    fn near_capacity_weight_is_not_a_perfect_fit() {
        let spec = freight(57.0, 9.2, 12.5, 105_000.0);
        let candidate = car("loaded", 60.0, 9.5, 13.0, 110_000.0);
        let rec = score_candidate(&spec, Operator::Bnsf, &candidate).unwrap();
        assert!(rec.utilization.weight > 0.9);
        assert!(!rec.is_perfect_fit);
    }

    #[test]
    fn results_are_sorted_and_deterministically_tie_broken() {
        let catalog = CarCatalog::builtin();
        let spec = freight(45.0, 8.0, 10.0, 80_000.0);
        let operators = [Operator::Bnsf, Operator::UnionPacific];
        let recommendations = recommend_cars(&spec, &operators, &catalog);
        assert!(!recommendations.is_empty());

        for pair in recommendations.windows(2) {
            let ordered = pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score
                    && (pair[0].operator.mark(), &pair[0].car.id)
                        <= (pair[1].operator.mark(), &pair[1].car.id));
            assert!(ordered, "recommendations out of order");
        }
    }

    #[test]
    fn best_car_matches_first_recommendation() {
        let catalog = CarCatalog::builtin();
        let spec = freight(45.0, 8.0, 10.0, 80_000.0);
        let operators = [Operator::Bnsf, Operator::UnionPacific];
        let all = recommend_cars(&spec, &operators, &catalog);
        let best = best_car(&spec, &operators, &catalog).unwrap();
        assert_eq!(best.car.id, all[0].car.id);
        assert_eq!(best.operator, all[0].operator);
    }
}
