//! Compliance probability scoring.
//!
//! Five independently-scored factors are blended with fixed weights into a
//! 0-100 probability of operational approval, with categorized issues,
//! warnings, and derived recommendations. The calculator always produces a
//! result for freight and car specs with positive dimensions; a failed CG
//! analysis degrades to an estimate instead of aborting.

use serde::Serialize;
use tracing::warn;

use crate::car::{CarType, FreightSpec};
use crate::cog::{
    analyze_center_of_gravity, CgPoint, Placement, LATERAL_OFFSET_LIMIT,
    LONGITUDINAL_OFFSET_LIMIT, VERTICAL_CLEARANCE_FT,
};
use crate::network::Operator;
use crate::route::Route;

const DIMENSION_FACTOR_WEIGHT: f64 = 0.40;
const WEIGHT_FACTOR_WEIGHT: f64 = 0.25;
const CG_FACTOR_WEIGHT: f64 = 0.20;
const OPERATOR_FACTOR_WEIGHT: f64 = 0.10;
const ROUTE_FACTOR_WEIGHT: f64 = 0.05;

/// Probability penalty per critical issue, applied after the weighted sum.
const CRITICAL_ISSUE_PENALTY: f64 = 20.0;

const MAX_LONGITUDINAL_PENALTY: f64 = 30.0;
const MAX_LATERAL_PENALTY: f64 = 20.0;
const VERTICAL_PENALTY: f64 = 15.0;

/// Operator-specific loading rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorRules {
    pub max_height_ft: f64,
    /// Preferred loaded weight band in pounds (min, max).
    pub preferred_weight_range: (f64, f64),
}

/// Rule table per operator. Operators without a bespoke table share BNSF's
/// values, the documented fallback.
pub fn operator_rules(operator: Operator) -> OperatorRules {
    const BNSF_RULES: OperatorRules = OperatorRules {
        max_height_ft: 15.5,
        preferred_weight_range: (20_000.0, 200_000.0),
    };

    match operator {
        Operator::Bnsf => BNSF_RULES,
        Operator::UnionPacific => OperatorRules {
            max_height_ft: 15.0,
            preferred_weight_range: (25_000.0, 210_000.0),
        },
        Operator::Csx => OperatorRules {
            max_height_ft: 14.5,
            preferred_weight_range: (20_000.0, 190_000.0),
        },
        Operator::NorfolkSouthern => OperatorRules {
            max_height_ft: 14.8,
            preferred_weight_range: (20_000.0, 195_000.0),
        },
        Operator::CanadianNational
        | Operator::CanadianPacific
        | Operator::KansasCitySouthern => BNSF_RULES,
    }
}

/// Approval likelihood band for a probability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceCategory {
    VeryLow,
    Low,
    Medium,
    High,
}

impl ComplianceCategory {
    pub fn from_probability(probability: u8) -> Self {
        match probability {
            85..=u8::MAX => ComplianceCategory::High,
            70..=84 => ComplianceCategory::Medium,
            50..=69 => ComplianceCategory::Low,
            _ => ComplianceCategory::VeryLow,
        }
    }

    /// Fixed display color for the category.
    pub fn color(&self) -> &'static str {
        match self {
            ComplianceCategory::High => "#16a34a",
            ComplianceCategory::Medium => "#eab308",
            ComplianceCategory::Low => "#f97316",
            ComplianceCategory::VeryLow => "#dc2626",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplianceCategory::High => "High",
            ComplianceCategory::Medium => "Medium",
            ComplianceCategory::Low => "Low",
            ComplianceCategory::VeryLow => "Very Low",
        }
    }
}

/// One scored compliance factor.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceFactor {
    pub name: String,
    /// Factor score in `[0, 100]`.
    pub score: f64,
    /// Contribution weight in the blended probability.
    pub weight: f64,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendationPriority {
    Critical,
    High,
    Medium,
}

/// A prioritized recommendation bucket, derived on every call.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub messages: Vec<String>,
}

/// Result of a compliance evaluation. Recomputed on every input change,
/// never cached.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceResult {
    /// Final probability, integer percent.
    pub probability: u8,
    pub category: ComplianceCategory,
    pub factors: Vec<ComplianceFactor>,
    pub warnings: Vec<String>,
    pub critical_issues: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

struct FactorOutcome {
    score: f64,
    details: Vec<String>,
    critical: Vec<String>,
    warnings: Vec<String>,
}

impl FactorOutcome {
    fn new() -> Self {
        Self {
            score: 100.0,
            details: Vec::new(),
            critical: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Evaluate approval probability for loading the freight on the car at the
/// given placement, hauled by `operator` over `route`.
pub fn calculate_compliance(
    freight: &FreightSpec,
    car: &CarType,
    placement: Placement,
    route: &Route,
    operator: Operator,
) -> ComplianceResult {
    let freight = freight.to_imperial();

    let outcomes = [
        ("Dimension Compliance", DIMENSION_FACTOR_WEIGHT, dimension_factor(&freight, car)),
        ("Weight Compliance", WEIGHT_FACTOR_WEIGHT, weight_factor(&freight, car)),
        ("Center of Gravity", CG_FACTOR_WEIGHT, cg_factor(&freight, car, placement)),
        ("Operator Rules", OPERATOR_FACTOR_WEIGHT, operator_factor(&freight, operator)),
        ("Route Compatibility", ROUTE_FACTOR_WEIGHT, route_factor(&freight, route, operator)),
    ];

    let mut factors = Vec::with_capacity(outcomes.len());
    let mut warnings = Vec::new();
    let mut critical_issues = Vec::new();
    let mut base = 0.0;

    for (name, weight, outcome) in outcomes {
        base += outcome.score * weight;
        warnings.extend(outcome.warnings);
        critical_issues.extend(outcome.critical);
        factors.push(ComplianceFactor {
            name: name.to_string(),
            score: outcome.score,
            weight,
            details: outcome.details,
        });
    }

    let penalized = base - CRITICAL_ISSUE_PENALTY * critical_issues.len() as f64;
    let probability = penalized.clamp(0.0, 100.0).round() as u8;
    let category = ComplianceCategory::from_probability(probability);
    let recommendations = build_recommendations(&factors, &warnings, &critical_issues);

    ComplianceResult {
        probability,
        category,
        factors,
        warnings,
        critical_issues,
        recommendations,
    }
}

fn dimension_factor(freight: &FreightSpec, car: &CarType) -> FactorOutcome {
    let mut outcome = FactorOutcome::new();

    if freight.length > car.length_ft {
        outcome.score -= 40.0;
        outcome.critical.push(format!(
            "freight length {:.1} ft does not fit car length {:.1} ft",
            freight.length, car.length_ft
        ));
    }
    if freight.width > car.width_ft {
        outcome.score -= 30.0;
        outcome.critical.push(format!(
            "freight width {:.1} ft does not fit car width {:.1} ft",
            freight.width, car.width_ft
        ));
    }
    if freight.height > car.height_ft {
        outcome.score -= 30.0;
        outcome.critical.push(format!(
            "freight height {:.1} ft does not fit usable car height {:.1} ft",
            freight.height, car.height_ft
        ));
    }

    let length_utilization = freight.length / car.length_ft;
    if freight.length <= car.length_ft && length_utilization > 0.95 {
        outcome.score -= 5.0;
        outcome
            .warnings
            .push("length fit is very tight (over 95% of car length)".to_string());
    }

    outcome.details.push(format!(
        "length {:.0}%, width {:.0}%, height {:.0}% of car dimensions",
        length_utilization * 100.0,
        freight.width / car.width_ft * 100.0,
        freight.height / car.height_ft * 100.0
    ));

    outcome.score = outcome.score.max(0.0);
    outcome
}

fn weight_factor(freight: &FreightSpec, car: &CarType) -> FactorOutcome {
    let mut outcome = FactorOutcome::new();
    let utilization = freight.weight / car.max_weight_lb;
    outcome
        .details
        .push(format!("weight utilization {:.0}%", utilization * 100.0));

    if freight.weight > car.max_weight_lb {
        outcome.score = 0.0;
        outcome.critical.push(format!(
            "freight weight {:.0} lb exceeds car capacity {:.0} lb",
            freight.weight, car.max_weight_lb
        ));
        return outcome;
    }

    if utilization > 0.9 {
        outcome.score -= 10.0;
        outcome
            .warnings
            .push("loaded weight is within 10% of car capacity".to_string());
    } else if utilization < 0.3 {
        outcome.score -= 5.0;
        outcome
            .warnings
            .push("car weight capacity is poorly utilized (under 30%)".to_string());
    }

    outcome
}

fn cg_factor(freight: &FreightSpec, car: &CarType, placement: Placement) -> FactorOutcome {
    let mut outcome = FactorOutcome::new();

    let combined = match analyze_center_of_gravity(freight, car, placement) {
        Ok(analysis) => analysis.combined_cg,
        Err(err) => {
            // Never abort compliance over a CG failure; estimate from the
            // placement offsets and deck height instead.
            warn!(%err, "CG analysis failed, using placement-based estimate");
            outcome
                .warnings
                .push("center of gravity estimated from placement offsets".to_string());
            CgPoint {
                x: placement.x_offset_ft,
                y: placement.y_offset_ft,
                z: car.deck_height_ft.max(0.0) + freight.height / 2.0,
            }
        }
    };

    outcome.details.push(format!(
        "combined CG at ({:.1}, {:.1}, {:.1}) ft",
        combined.x, combined.y, combined.z
    ));

    let longitudinal_limit = LONGITUDINAL_OFFSET_LIMIT * car.length_ft;
    if longitudinal_limit > 0.0 && combined.x.abs() > longitudinal_limit {
        let excess = (combined.x.abs() - longitudinal_limit) / longitudinal_limit;
        let penalty = (MAX_LONGITUDINAL_PENALTY * excess).min(MAX_LONGITUDINAL_PENALTY);
        outcome.score -= penalty;
        outcome.warnings.push(format!(
            "combined CG {:.1} ft off center longitudinally (limit {:.1} ft)",
            combined.x, longitudinal_limit
        ));
    }

    let lateral_limit = LATERAL_OFFSET_LIMIT * car.width_ft;
    if lateral_limit > 0.0 && combined.y.abs() > lateral_limit {
        let excess = (combined.y.abs() - lateral_limit) / lateral_limit;
        let penalty = (MAX_LATERAL_PENALTY * excess).min(MAX_LATERAL_PENALTY);
        outcome.score -= penalty;
        outcome.warnings.push(format!(
            "combined CG {:.1} ft off centerline laterally (limit {:.1} ft)",
            combined.y, lateral_limit
        ));
    }

    let vertical_limit = car.height_ft + car.deck_height_ft - VERTICAL_CLEARANCE_FT;
    if combined.z > vertical_limit {
        outcome.score -= VERTICAL_PENALTY;
        outcome.warnings.push(format!(
            "combined CG height {:.1} ft exceeds stable limit {:.1} ft",
            combined.z, vertical_limit
        ));
    }

    outcome.score = outcome.score.max(0.0);
    outcome
}

fn operator_factor(freight: &FreightSpec, operator: Operator) -> FactorOutcome {
    let mut outcome = FactorOutcome::new();
    let rules = operator_rules(operator);
    let (preferred_min, preferred_max) = rules.preferred_weight_range;

    outcome.details.push(format!(
        "{} allows loads to {:.1} ft, preferred weight {:.0}-{:.0} lb",
        operator, rules.max_height_ft, preferred_min, preferred_max
    ));

    if freight.height > rules.max_height_ft {
        outcome.score -= 15.0;
        outcome.warnings.push(format!(
            "load height {:.1} ft exceeds {} limit of {:.1} ft",
            freight.height, operator, rules.max_height_ft
        ));
    }
    if freight.weight < preferred_min {
        outcome.score -= 5.0;
        outcome.warnings.push(format!(
            "load weight is below the {} preferred minimum",
            operator
        ));
    } else if freight.weight > preferred_max {
        outcome.score -= 10.0;
        outcome.warnings.push(format!(
            "load weight is above the {} preferred maximum",
            operator
        ));
    }

    outcome
}

fn route_factor(freight: &FreightSpec, route: &Route, operator: Operator) -> FactorOutcome {
    let mut outcome = FactorOutcome::new();

    if !route.operators.contains(&operator) {
        outcome.score -= 20.0;
        outcome.warnings.push(format!(
            "{} does not operate on the selected route",
            operator
        ));
    }

    if route.total_distance > 2000.0 && freight.weight > 200_000.0 {
        outcome.score -= 5.0;
        outcome
            .warnings
            .push("long-haul move with heavy freight; expect extra inspection".to_string());
    }

    outcome.details.push(format!(
        "route covers {:.0} mi on {} operator(s)",
        route.total_distance,
        route.operators.len()
    ));

    outcome
}

fn build_recommendations(
    factors: &[ComplianceFactor],
    warnings: &[String],
    critical_issues: &[String],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if !critical_issues.is_empty() {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::Critical,
            messages: critical_issues.to_vec(),
        });
    }

    let weak: Vec<String> = factors
        .iter()
        .filter(|factor| factor.score < 70.0)
        .map(|factor| format!("improve {} (score {:.0})", factor.name, factor.score))
        .collect();
    if !weak.is_empty() {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::High,
            messages: weak,
        });
    }

    if !warnings.is_empty() {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::Medium,
            messages: warnings.to_vec(),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::UnitSystem;
    use crate::search::{find_routes, RoutePreferences};

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

    fn test_car() -> CarType {
        CarType {
            id: "box-60".to_string(),
            name: "60' Boxcar".to_string(),
            length_ft: 60.0,
            width_ft: 9.5,
            height_ft: 15.0,
            max_weight_lb: 220_000.0,
            deck_height_ft: 4.0,
        }
    }

    fn bnsf_route() -> Route {
        let network = crate::network::RailNetwork::north_america();
        find_routes(network, "CHI", "KC", &RoutePreferences::default())
            .unwrap()
            .into_iter()
            .next()
            .expect("CHI-KC route exists")
    }

    #[test]
    fn compliant_load_scores_high() {
        let result = calculate_compliance(
            &freight(40.0, 8.0, 10.0, 100_000.0),
            &test_car(),
            Placement::default(),
            &bnsf_route(),
            Operator::Bnsf,
        );

        assert!(result.critical_issues.is_empty());
        assert!(result.probability >= 85);
        assert_eq!(result.category, ComplianceCategory::High);
        assert_eq!(result.factors.len(), 5);

        let weights: f64 = result.factors.iter().map(|f| f.weight).sum();
        assert!((weights - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overweight_load_zeroes_weight_factor() {
        let result = calculate_compliance(
            &freight(40.0, 8.0, 10.0, 300_000.0),
            &test_car(),
            Placement::default(),
            &bnsf_route(),
            Operator::Bnsf,
        );

        let weight_factor = result
            .factors
            .iter()
            .find(|f| f.name == "Weight Compliance")
            .unwrap();
        assert_eq!(weight_factor.score, 0.0);
        assert!(!result.critical_issues.is_empty());

        let critical_bucket = &result.recommendations[0];
        assert_eq!(critical_bucket.priority, RecommendationPriority::Critical);
    }

    #[test]
    fn dimension_failures_stack_to_zero() {
        let result = calculate_compliance(
            &freight(100.0, 12.0, 20.0, 100_000.0),
            &test_car(),
            Placement::default(),
            &bnsf_route(),
            Operator::Bnsf,
        );

        let dimension_factor = result
            .factors
            .iter()
            .find(|f| f.name == "Dimension Compliance")
            .unwrap();
        assert_eq!(dimension_factor.score, 0.0);
        assert_eq!(result.critical_issues.len(), 3);
        assert_eq!(result.category, ComplianceCategory::VeryLow);
    }

    #[test]
    fn off_route_operator_is_penalized_not_critical() {
        let baseline = calculate_compliance(
            &freight(40.0, 8.0, 10.0, 100_000.0),
            &test_car(),
            Placement::default(),
            &bnsf_route(),
            Operator::Bnsf,
        );
        let off_route = calculate_compliance(
            &freight(40.0, 8.0, 10.0, 100_000.0),
            &test_car(),
            Placement::default(),
            &bnsf_route(),
            Operator::Csx,
        );

        assert!(off_route.probability < baseline.probability);
        assert!(off_route.critical_issues.is_empty());
        assert!(off_route
            .warnings
            .iter()
            .any(|w| w.contains("does not operate")));
    }

    #[test]
    fn malformed_car_still_produces_a_result() {
        let mut car = test_car();
        car.length_ft = 0.0;

        let result = calculate_compliance(
            &freight(40.0, 8.0, 10.0, 100_000.0),
            &car,
            Placement::default(),
            &bnsf_route(),
            Operator::Bnsf,
        );

        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("estimated from placement offsets")));
        assert!(result.probability <= 100);
    }

    #[test]
    fn graduated_longitudinal_penalty_grows_with_offset() {
        let near = calculate_compliance(
            &freight(30.0, 8.0, 10.0, 180_000.0),
            &test_car(),
            Placement { x_offset_ft: 10.0, y_offset_ft: 0.0 },
            &bnsf_route(),
            Operator::Bnsf,
        );
        let far = calculate_compliance(
            &freight(30.0, 8.0, 10.0, 180_000.0),
            &test_car(),
            Placement { x_offset_ft: 14.0, y_offset_ft: 0.0 },
            &bnsf_route(),
            Operator::Bnsf,
        );

        let score = |result: &ComplianceResult| {
            result
                .factors
                .iter()
                .find(|f| f.name == "Center of Gravity")
                .unwrap()
                .score
        };
        assert!(score(&far) < score(&near));
    }

    #[test]
    fn category_thresholds_match_contract() {
        assert_eq!(ComplianceCategory::from_probability(85), ComplianceCategory::High);
        assert_eq!(ComplianceCategory::from_probability(84), ComplianceCategory::Medium);
        assert_eq!(ComplianceCategory::from_probability(70), ComplianceCategory::Medium);
        assert_eq!(ComplianceCategory::from_probability(69), ComplianceCategory::Low);
        assert_eq!(ComplianceCategory::from_probability(50), ComplianceCategory::Low);
        assert_eq!(ComplianceCategory::from_probability(49), ComplianceCategory::VeryLow);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let run = || {
            calculate_compliance(
                &freight(40.0, 8.0, 10.0, 100_000.0),
                &test_car(),
                Placement { x_offset_ft: 2.0, y_offset_ft: 0.3 },
                &bnsf_route(),
                Operator::Bnsf,
            )
        };
        let a = run();
        let b = run();
        assert_eq!(a.probability, b.probability);
        assert_eq!(a.warnings, b.warnings);
        assert_eq!(a.critical_issues, b.critical_issues);
    }
}
