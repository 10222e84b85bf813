//! End-to-end scenarios over the built-in network and catalog.

use railplan_lib::{
    analyze_center_of_gravity, calculate_compliance, estimate_route_cost, find_routes,
    CarType, FreightSpec, Operator, Placement, RailNetwork, RoutePreferences, UnitSystem,
};

fn freight(length: f64, width: f64, height: f64, weight: f64) -> FreightSpec {
    FreightSpec {
        description: "scenario load".to_string(),
        length,
        width,
        height,
        weight,
        unit_system: UnitSystem::Imperial,
    }
}

fn scenario_car() -> CarType {
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

#[test]
fn chicago_to_kansas_city_direct_mainline() {
    let preferences = RoutePreferences {
        weight_distance: 1.0,
        weight_single_operator: 0.5,
        weight_curves: 0.3,
        max_transfers: 5,
        ..RoutePreferences::default()
    };

    let routes = find_routes(RailNetwork::north_america(), "CHI", "KC", &preferences)
        .expect("stations resolve");
    assert!(!routes.is_empty());

    let best = &routes[0];
    assert_eq!(best.stations.first().unwrap().name, "Chicago");
    assert_eq!(best.stations.last().unwrap().name, "Kansas City");
    assert_eq!(best.total_distance, 500.0);
}

#[test]
fn centered_machinery_load_is_stable() {
    let analysis = analyze_center_of_gravity(
        &freight(40.0, 8.0, 10.0, 50_000.0),
        &scenario_car(),
        Placement::default(),
    )
    .expect("analysis succeeds");

    assert!(analysis.validation.is_valid);
    assert!(analysis.combined_cg.z > 4.0);
    assert!(analysis.combined_cg.z < 19.0);
}

#[test]
fn oversized_load_fails_on_all_three_axes() {
    let analysis = analyze_center_of_gravity(
        &freight(100.0, 12.0, 20.0, 50_000.0),
        &scenario_car(),
        Placement::default(),
    )
    .expect("analysis succeeds");

    assert!(!analysis.validation.is_valid);
    assert!(analysis.validation.issues.len() >= 3);
}

#[test]
fn overweight_load_zeroes_weight_compliance() {
    let routes = find_routes(
        RailNetwork::north_america(),
        "CHI",
        "KC",
        &RoutePreferences::default(),
    )
    .unwrap();

    let result = calculate_compliance(
        &freight(40.0, 8.0, 10.0, 300_000.0),
        &scenario_car(),
        Placement::default(),
        &routes[0],
        Operator::Bnsf,
    );

    let weight_factor = result
        .factors
        .iter()
        .find(|f| f.name == "Weight Compliance")
        .expect("weight factor present");
    assert_eq!(weight_factor.score, 0.0);
    assert!(!result.critical_issues.is_empty());
}

#[test]
fn segmentless_route_estimates_to_zero() {
    let mut route = find_routes(
        RailNetwork::north_america(),
        "CHI",
        "KC",
        &RoutePreferences::default(),
    )
    .unwrap()
    .remove(0);
    route.segments.clear();

    let estimate = estimate_route_cost(&route, 1000.0);
    assert_eq!(estimate.total_cost, 0.0);
}
