//! Route assembly: turning a station sequence into segment-level detail.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::network::{Operator, RailNetwork, Station};
use crate::search::RoutePreferences;

/// One hop of a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    pub from: String,
    pub to: String,
    pub distance_miles: f64,
    pub operator: Operator,
    pub curve_score: f64,
    pub states: Vec<String>,
}

/// Interline handoff: a station where consecutive segments change operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferPoint {
    pub station: String,
    pub from_operator: Operator,
    pub to_operator: Operator,
}

/// Planned route returned by the search engine. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    /// Stations visited, in order.
    pub stations: Vec<Station>,
    pub segments: Vec<RouteSegment>,
    /// Sum of segment miles, rounded to whole miles.
    pub total_distance: f64,
    pub operators: BTreeSet<Operator>,
    pub operator_count: usize,
    pub transfer_points: Vec<TransferPoint>,
    /// Sorted, de-duplicated states and provinces traversed.
    pub states_traversed: Vec<String>,
    /// Internal search cost, not a monetary amount.
    pub total_cost: f64,
    pub total_curve_score: f64,
}

impl Route {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of interline handoffs.
    pub fn transfer_count(&self) -> usize {
        self.transfer_points.len()
    }

    /// Station code of the origin terminal.
    pub fn origin(&self) -> Option<&str> {
        self.stations.first().map(|s| s.code.as_str())
    }

    /// Station code of the destination terminal.
    pub fn destination(&self) -> Option<&str> {
        self.stations.last().map(|s| s.code.as_str())
    }
}

/// Materialize a station sequence into a full route.
///
/// Each hop is resolved to the first connection in static list order that
/// links the pair and passes the preference operator filter; deterministic,
/// though not cost-optimal at the per-edge level when parallel edges exist.
/// Returns `None` if any hop has no admissible connection.
pub(crate) fn build_route_details(
    network: &RailNetwork,
    codes: &[String],
    total_cost: f64,
    preferences: &RoutePreferences,
) -> Option<Route> {
    if codes.len() < 2 {
        return None;
    }

    let stations: Option<Vec<Station>> = codes
        .iter()
        .map(|code| network.station(code).cloned())
        .collect();
    let stations = stations?;

    let mut segments = Vec::with_capacity(codes.len() - 1);
    let mut operators = BTreeSet::new();
    let mut states = BTreeSet::new();
    let mut raw_distance = 0.0;
    let mut total_curve_score = 0.0;

    for pair in codes.windows(2) {
        let connection = network
            .connections
            .iter()
            .find(|c| c.links(&pair[0], &pair[1]) && preferences.allows_operator(c.operator))?;

        raw_distance += connection.distance_miles;
        total_curve_score += connection.curve_score;
        operators.insert(connection.operator);
        states.extend(connection.states.iter().cloned());

        segments.push(RouteSegment {
            from: pair[0].clone(),
            to: pair[1].clone(),
            distance_miles: connection.distance_miles,
            operator: connection.operator,
            curve_score: connection.curve_score,
            states: connection.states.clone(),
        });
    }

    let mut transfer_points = Vec::new();
    for window in segments.windows(2) {
        if window[0].operator != window[1].operator {
            transfer_points.push(TransferPoint {
                station: window[1].from.clone(),
                from_operator: window[0].operator,
                to_operator: window[1].operator,
            });
        }
    }

    let operator_count = operators.len();
    Some(Route {
        stations,
        segments,
        total_distance: raw_distance.round(),
        operators,
        operator_count,
        transfer_points,
        states_traversed: states.into_iter().collect(),
        total_cost,
        total_curve_score,
    })
}
