use std::collections::HashMap;

use crate::network::{Operator, RailNetwork};

/// Edge within the routing graph.
#[derive(Debug, Clone)]
pub struct Edge {
    pub target: String,
    pub operator: Operator,
    pub distance_miles: f64,
    pub curve_score: f64,
    pub states: Vec<String>,
}

/// Adjacency view over a rail network, used by the route search.
///
/// Connections are undirected, so every connection contributes an edge in
/// both directions. Parallel edges between the same station pair are kept
/// as distinct entries (multigraph).
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<String, Vec<Edge>>,
}

impl Graph {
    /// Return the outgoing edges for a given station code.
    pub fn neighbours(&self, code: &str) -> &[Edge] {
        self.adjacency
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Build the routing graph for a network.
pub fn build_graph(network: &RailNetwork) -> Graph {
    let mut adjacency: HashMap<String, Vec<Edge>> = HashMap::new();
    for code in network.stations.keys() {
        adjacency.entry(code.clone()).or_default();
    }

    for connection in &network.connections {
        for (from, to) in [
            (&connection.from, &connection.to),
            (&connection.to, &connection.from),
        ] {
            adjacency.entry(from.clone()).or_default().push(Edge {
                target: to.clone(),
                operator: connection.operator,
                distance_miles: connection.distance_miles,
                curve_score: connection.curve_score,
                states: connection.states.clone(),
            });
        }
    }

    Graph { adjacency }
}
