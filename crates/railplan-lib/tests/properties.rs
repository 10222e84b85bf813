//! Engine-wide invariants checked across the built-in network.

use railplan_lib::{
    analyze_center_of_gravity, calculate_compliance, find_routes, recommend_cars, CarCatalog,
    CarType, FreightSpec, Operator, Placement, RailNetwork, Route, RoutePreferences,
    UnitSystem,
};

fn freight(length: f64, width: f64, height: f64, weight: f64) -> FreightSpec {
    FreightSpec {
        description: "property load".to_string(),
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

fn sample_routes(network: &RailNetwork) -> Vec<Route> {
    let preferences = RoutePreferences::default();
    let pairs = [
        ("CHI", "KC"),
        ("CHI", "NOL"),
        ("SEA", "CHI"),
        ("NYC", "ATL"),
        ("KC", "LAX"),
    ];
    pairs
        .iter()
        .flat_map(|(from, to)| find_routes(network, from, to, &preferences).unwrap())
        .collect()
}

#[test]
fn no_station_routes_to_itself() {
    let network = RailNetwork::north_america();
    let preferences = RoutePreferences::default();
    for station in network.stations_sorted() {
        let routes = find_routes(network, &station.code, &station.code, &preferences).unwrap();
        assert!(routes.is_empty(), "{} routed to itself", station.code);
    }
}

#[test]
fn returned_paths_are_acyclic_and_connected() {
    let network = RailNetwork::north_america();
    for route in sample_routes(network) {
        let codes: Vec<&str> = route.stations.iter().map(|s| s.code.as_str()).collect();

        let mut unique = codes.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), codes.len(), "repeated station in route");

        for pair in codes.windows(2) {
            assert!(
                network
                    .connections
                    .iter()
                    .any(|c| c.links(pair[0], pair[1])),
                "no edge between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn transfer_bound_limits_station_count_not_hops() {
    let network = RailNetwork::north_america();
    let preferences = RoutePreferences::default();
    for route in sample_routes(network) {
        assert!(route.stations.len() <= preferences.max_transfers + 1);
    }
}

#[test]
fn total_distance_is_rounded_segment_sum() {
    let network = RailNetwork::north_america();
    for route in sample_routes(network) {
        let raw: f64 = route.segments.iter().map(|s| s.distance_miles).sum();
        assert_eq!(route.total_distance, raw.round());
    }
}

#[test]
fn transfer_points_exactly_track_operator_changes() {
    let network = RailNetwork::north_america();
    for route in sample_routes(network) {
        let expected: Vec<&str> = route
            .segments
            .windows(2)
            .filter(|pair| pair[0].operator != pair[1].operator)
            .map(|pair| pair[1].from.as_str())
            .collect();
        let actual: Vec<&str> = route
            .transfer_points
            .iter()
            .map(|t| t.station.as_str())
            .collect();
        assert_eq!(expected, actual);
    }
}

#[test]
fn hard_limits_exclude_cars_outright() {
    let catalog = CarCatalog::builtin();
    let operators = Operator::ALL;

    let too_long = freight(95.0, 8.0, 10.0, 50_000.0);
    for recommendation in recommend_cars(&too_long, &operators, &catalog) {
        assert!(recommendation.car.length_ft >= too_long.length);
    }

    let too_heavy = freight(40.0, 8.0, 10.0, 450_000.0);
    assert!(recommend_cars(&too_heavy, &operators, &catalog).is_empty());
}

#[test]
fn combined_cg_is_a_convex_blend() {
    let analysis = analyze_center_of_gravity(
        &freight(40.0, 8.0, 6.0, 80_000.0),
        &test_car(),
        Placement::default(),
    )
    .unwrap();

    let low = analysis.freight_cg.z.min(analysis.car_cg.z);
    let high = analysis.freight_cg.z.max(analysis.car_cg.z);
    assert!(analysis.combined_cg.z > low);
    assert!(analysis.combined_cg.z < high);
}

#[test]
fn crossing_the_weight_limit_is_a_step_change() {
    let network = RailNetwork::north_america();
    let route = &find_routes(network, "CHI", "KC", &RoutePreferences::default()).unwrap()[0];
    let car = test_car();

    let under = calculate_compliance(
        &freight(40.0, 8.0, 10.0, 219_000.0),
        &car,
        Placement::default(),
        route,
        Operator::Bnsf,
    );
    let over = calculate_compliance(
        &freight(40.0, 8.0, 10.0, 221_000.0),
        &car,
        Placement::default(),
        route,
        Operator::Bnsf,
    );

    let weight_score = |result: &railplan_lib::ComplianceResult| {
        result
            .factors
            .iter()
            .find(|f| f.name == "Weight Compliance")
            .unwrap()
            .score
    };

    assert!(weight_score(&under) > 0.0);
    assert_eq!(weight_score(&over), 0.0);
    assert!(under.critical_issues.is_empty());
    assert!(!over.critical_issues.is_empty());
}

#[test]
fn core_functions_are_idempotent() {
    let network = RailNetwork::north_america();
    let preferences = RoutePreferences::default();
    let catalog = CarCatalog::builtin();
    let spec = freight(40.0, 8.0, 10.0, 100_000.0);

    let routes_a = find_routes(network, "CHI", "NOL", &preferences).unwrap();
    let routes_b = find_routes(network, "CHI", "NOL", &preferences).unwrap();
    assert_eq!(routes_a.len(), routes_b.len());
    for (a, b) in routes_a.iter().zip(routes_b.iter()) {
        assert_eq!(a.total_cost, b.total_cost);
        assert_eq!(a.total_distance, b.total_distance);
    }

    let recs_a = recommend_cars(&spec, &Operator::ALL, &catalog);
    let recs_b = recommend_cars(&spec, &Operator::ALL, &catalog);
    assert_eq!(recs_a.len(), recs_b.len());
    for (a, b) in recs_a.iter().zip(recs_b.iter()) {
        assert_eq!(a.car.id, b.car.id);
        assert_eq!(a.score, b.score);
    }
}
