//! Rail network model: stations, operator-tagged connections, and lookups.
//!
//! The network is supplied by a provider (JSON file or the built-in North
//! American sample) and is read-only once loaded. Connections form an
//! undirected multigraph: the same station pair may be linked by several
//! edges under different operators.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Class I rail operators modeled by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "BNSF")]
    Bnsf,
    #[serde(rename = "UP")]
    UnionPacific,
    #[serde(rename = "CSX")]
    Csx,
    #[serde(rename = "NS")]
    NorfolkSouthern,
    #[serde(rename = "CN")]
    CanadianNational,
    #[serde(rename = "CP")]
    CanadianPacific,
    #[serde(rename = "KCS")]
    KansasCitySouthern,
}

impl Operator {
    /// All operators, in reporting-mark order.
    pub const ALL: [Operator; 7] = [
        Operator::Bnsf,
        Operator::UnionPacific,
        Operator::Csx,
        Operator::NorfolkSouthern,
        Operator::CanadianNational,
        Operator::CanadianPacific,
        Operator::KansasCitySouthern,
    ];

    /// Standard reporting mark for the operator.
    pub fn mark(&self) -> &'static str {
        match self {
            Operator::Bnsf => "BNSF",
            Operator::UnionPacific => "UP",
            Operator::Csx => "CSX",
            Operator::NorfolkSouthern => "NS",
            Operator::CanadianNational => "CN",
            Operator::CanadianPacific => "CP",
            Operator::KansasCitySouthern => "KCS",
        }
    }

    /// Full railroad name.
    pub fn full_name(&self) -> &'static str {
        match self {
            Operator::Bnsf => "BNSF Railway",
            Operator::UnionPacific => "Union Pacific",
            Operator::Csx => "CSX Transportation",
            Operator::NorfolkSouthern => "Norfolk Southern",
            Operator::CanadianNational => "Canadian National",
            Operator::CanadianPacific => "Canadian Pacific",
            Operator::KansasCitySouthern => "Kansas City Southern",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mark())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        Operator::ALL
            .iter()
            .copied()
            .find(|op| {
                op.mark() == normalized
                    || op.full_name().to_ascii_uppercase() == normalized
            })
            .ok_or_else(|| Error::NetworkDataValidation {
                message: format!("unknown operator '{}'", value),
            })
    }
}

/// Terminal station on the modeled network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station code, e.g. "CHI".
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Two-letter state or province.
    pub region: String,
    pub primary_operator: Operator,
}

/// Undirected connection between two stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub distance_miles: f64,
    pub operator: Operator,
    /// Curviness proxy in `[1, 10]`; routing penalty, not geometry.
    pub curve_score: f64,
    /// States or provinces the segment passes through.
    pub states: Vec<String>,
}

impl Connection {
    /// Whether this edge links the given station pair, in either direction.
    pub fn links(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// In-memory representation of the rail network.
#[derive(Debug, Clone, Default)]
pub struct RailNetwork {
    pub stations: HashMap<String, Station>,
    pub connections: Vec<Connection>,
}

/// Serialized form of a network dataset file.
#[derive(Debug, Serialize, Deserialize)]
struct NetworkFile {
    stations: Vec<Station>,
    connections: Vec<Connection>,
}

impl RailNetwork {
    /// Build a network from parts, validating structural integrity.
    pub fn new(stations: Vec<Station>, connections: Vec<Connection>) -> Result<Self> {
        let mut by_code: HashMap<String, Station> = HashMap::with_capacity(stations.len());
        for station in stations {
            let code = station.code.trim().to_ascii_uppercase();
            if code.is_empty() {
                return Err(Error::NetworkDataValidation {
                    message: format!("station '{}' has an empty code", station.name),
                });
            }
            if by_code
                .insert(code.clone(), Station { code, ..station })
                .is_some()
            {
                return Err(Error::NetworkDataValidation {
                    message: "duplicate station code in dataset".to_string(),
                });
            }
        }

        for connection in &connections {
            for endpoint in [&connection.from, &connection.to] {
                if !by_code.contains_key(endpoint.as_str()) {
                    return Err(Error::NetworkDataValidation {
                        message: format!("connection references unknown station '{}'", endpoint),
                    });
                }
            }
            if connection.from == connection.to {
                return Err(Error::NetworkDataValidation {
                    message: format!("connection loops on station '{}'", connection.from),
                });
            }
            if !connection.distance_miles.is_finite() || connection.distance_miles <= 0.0 {
                return Err(Error::NetworkDataValidation {
                    message: format!(
                        "connection {}-{} has non-positive distance",
                        connection.from, connection.to
                    ),
                });
            }
            if !(1.0..=10.0).contains(&connection.curve_score) {
                return Err(Error::NetworkDataValidation {
                    message: format!(
                        "connection {}-{} curve score {} outside [1, 10]",
                        connection.from, connection.to, connection.curve_score
                    ),
                });
            }
        }

        debug!(
            stations = by_code.len(),
            connections = connections.len(),
            "loaded rail network"
        );

        Ok(Self {
            stations: by_code,
            connections,
        })
    }

    /// Load a network dataset from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let file: NetworkFile = serde_json::from_reader(reader)?;
        Self::new(file.stations, file.connections)
    }

    /// Load a network dataset from a JSON file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Lookup a station by code (case-insensitive).
    pub fn station(&self, code: &str) -> Option<&Station> {
        self.stations.get(&code.trim().to_ascii_uppercase())
    }

    /// Resolve a station code, returning an error with fuzzy suggestions
    /// when the code is unknown.
    pub fn resolve_station(&self, code: &str) -> Result<&Station> {
        self.station(code).ok_or_else(|| Error::UnknownStation {
            code: code.to_string(),
            suggestions: self.fuzzy_station_matches(code, 3),
        })
    }

    /// Closest station codes to a query, scored by Jaro-Winkler similarity
    /// over both the code and the display name.
    pub fn fuzzy_station_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .stations
            .values()
            .map(|station| {
                let code_score = strsim::jaro_winkler(&needle, &station.code);
                let name_score =
                    strsim::jaro_winkler(&needle, &station.name.to_ascii_uppercase());
                (code_score.max(name_score), station.code.as_str())
            })
            .filter(|(score, _)| *score >= 0.6)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }

    /// All stations sorted by code.
    pub fn stations_sorted(&self) -> Vec<&Station> {
        let mut stations: Vec<&Station> = self.stations.values().collect();
        stations.sort_by(|a, b| a.code.cmp(&b.code));
        stations
    }
}
