//! Multi-criteria route search over the rail network.
//!
//! A cost-guided best-first search expands acyclic candidate paths from the
//! origin, blending distance, operator changes, and curviness into a single
//! scalar cost. The search collects up to three destination-reached paths
//! and returns them best-first. It deliberately does not keep a per-station
//! closed set: revisiting a station along a different prefix is allowed so
//! the top-3 results stay diverse.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::graph::{build_graph, Graph};
use crate::network::{Operator, RailNetwork};
use crate::route::{build_route_details, Route};

/// Maximum number of routes returned to the caller.
const MAX_RESULT_ROUTES: usize = 3;
/// Safety bound on recorded completions, independent of the result cap.
const MAX_COMPLETED_PATHS: usize = 20;
/// Cost charged per operator beyond the first, before weighting.
const OPERATOR_CHANGE_COST: f64 = 100.0;
/// Cost charged per accumulated curve point, before weighting.
const CURVE_COST: f64 = 10.0;

/// Per-search configuration supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePreferences {
    pub weight_distance: f64,
    pub weight_single_operator: f64,
    pub weight_curves: f64,
    /// Bound on path length: a route may visit at most `max_transfers + 1`
    /// stations.
    pub max_transfers: usize,
    /// When non-empty, only these operators' edges may be used.
    pub require_operators: BTreeSet<Operator>,
    /// Edges under these operators are never used.
    pub avoid_operators: BTreeSet<Operator>,
}

impl Default for RoutePreferences {
    fn default() -> Self {
        Self {
            weight_distance: 1.0,
            weight_single_operator: 0.5,
            weight_curves: 0.3,
            max_transfers: 5,
            require_operators: BTreeSet::new(),
            avoid_operators: BTreeSet::new(),
        }
    }
}

impl RoutePreferences {
    /// Whether edges under the given operator are admissible.
    pub fn allows_operator(&self, operator: Operator) -> bool {
        if self.avoid_operators.contains(&operator) {
            return false;
        }
        self.require_operators.is_empty() || self.require_operators.contains(&operator)
    }
}

/// Search-internal candidate: an acyclic station sequence plus accumulated
/// totals.
#[derive(Debug, Clone)]
struct CandidatePath {
    stations: Vec<String>,
    cost: f64,
    distance: f64,
    curve_score: f64,
    operators: BTreeSet<Operator>,
}

impl CandidatePath {
    fn origin(code: String) -> Self {
        Self {
            stations: vec![code],
            cost: 0.0,
            distance: 0.0,
            curve_score: 0.0,
            operators: BTreeSet::new(),
        }
    }

    /// Dedup key: the full visited-station sequence.
    fn key(&self) -> String {
        self.stations.join(">")
    }

    fn last(&self) -> &str {
        self.stations.last().expect("candidate is never empty")
    }
}

#[derive(Debug)]
struct FrontierEntry {
    cost: f64,
    key: String,
    path: CandidatePath,
}

impl FrontierEntry {
    fn new(path: CandidatePath) -> Self {
        Self {
            cost: path.cost,
            key: path.key(),
            path,
        }
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost; ties
        // resolve to the lexicographically smallest path key.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find up to three routes between two stations, best-first.
///
/// Returns `Ok(vec![])` when origin and destination are the same station or
/// when no path satisfies the transfer bound and operator filters; unknown
/// station codes are the only error.
pub fn find_routes(
    network: &RailNetwork,
    origin: &str,
    destination: &str,
    preferences: &RoutePreferences,
) -> Result<Vec<Route>> {
    let origin_code = network.resolve_station(origin)?.code.clone();
    let destination_code = network.resolve_station(destination)?.code.clone();

    if origin_code == destination_code {
        return Ok(Vec::new());
    }

    let graph = build_graph(network);
    let completed = search(&graph, &origin_code, &destination_code, preferences);

    debug!(
        origin = %origin_code,
        destination = %destination_code,
        completed = completed.len(),
        "route search finished"
    );

    let mut routes: Vec<Route> = completed
        .into_iter()
        .filter_map(|path| build_route_details(network, &path.stations, path.cost, preferences))
        .collect();
    routes.truncate(MAX_RESULT_ROUTES);
    Ok(routes)
}

fn search(
    graph: &Graph,
    origin: &str,
    destination: &str,
    preferences: &RoutePreferences,
) -> Vec<CandidatePath> {
    let max_stations = preferences.max_transfers + 1;
    let mut frontier = BinaryHeap::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut completed: Vec<CandidatePath> = Vec::new();

    frontier.push(FrontierEntry::new(CandidatePath::origin(
        origin.to_string(),
    )));

    while let Some(entry) = frontier.pop() {
        // Identical station sequences can be enqueued via different frontier
        // orders; process each sequence once.
        if !seen.insert(entry.key) {
            continue;
        }
        let path = entry.path;

        if path.last() == destination {
            completed.push(path);
            if completed.len() >= MAX_RESULT_ROUTES || completed.len() >= MAX_COMPLETED_PATHS {
                break;
            }
            continue;
        }

        if path.stations.len() >= max_stations {
            continue;
        }

        for edge in graph.neighbours(path.last()) {
            if !preferences.allows_operator(edge.operator) {
                continue;
            }
            // Strictly acyclic paths only.
            if path.stations.iter().any(|code| code == &edge.target) {
                continue;
            }
            frontier.push(FrontierEntry::new(extend(&path, edge, preferences)));
        }
    }

    completed.sort_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.key().cmp(&b.key())));
    completed.truncate(MAX_RESULT_ROUTES);
    completed
}

/// Fork a candidate across an edge, recomputing the cost for the extended
/// path from scratch: the operator-change penalty depends on the cardinality
/// of the operator set, not on edge count, so it cannot be added as a delta.
fn extend(path: &CandidatePath, edge: &crate::graph::Edge, preferences: &RoutePreferences) -> CandidatePath {
    let mut stations = path.stations.clone();
    stations.push(edge.target.clone());

    let mut operators = path.operators.clone();
    operators.insert(edge.operator);

    let distance = path.distance + edge.distance_miles;
    let curve_score = path.curve_score + edge.curve_score;
    let operator_changes = operators.len().saturating_sub(1) as f64;

    let cost = distance * preferences.weight_distance
        + operator_changes * OPERATOR_CHANGE_COST * preferences.weight_single_operator
        + curve_score * CURVE_COST * preferences.weight_curves;

    CandidatePath {
        stations,
        cost,
        distance,
        curve_score,
        operators,
    }
}
