//! Built-in North American sample network.
//!
//! A small, static model of Class I mainline connections between major
//! terminals. Distances are rounded route miles; curve scores are the 1-10
//! routing proxy, not surveyed curvature.

use once_cell::sync::Lazy;

use crate::network::{Connection, Operator, RailNetwork, Station};

fn station(
    code: &str,
    name: &str,
    lat: f64,
    lng: f64,
    region: &str,
    primary_operator: Operator,
) -> Station {
    Station {
        code: code.to_string(),
        name: name.to_string(),
        lat,
        lng,
        region: region.to_string(),
        primary_operator,
    }
}

fn connection(
    from: &str,
    to: &str,
    distance_miles: f64,
    operator: Operator,
    curve_score: f64,
    states: &[&str],
) -> Connection {
    Connection {
        from: from.to_string(),
        to: to.to_string(),
        distance_miles,
        operator,
        curve_score,
        states: states.iter().map(|s| s.to_string()).collect(),
    }
}

static NORTH_AMERICA: Lazy<RailNetwork> = Lazy::new(|| {
    use Operator::*;

    let stations = vec![
        station("CHI", "Chicago", 41.88, -87.63, "IL", Bnsf),
        station("KC", "Kansas City", 39.10, -94.58, "MO", KansasCitySouthern),
        station("STL", "St. Louis", 38.63, -90.20, "MO", UnionPacific),
        station("MSP", "Minneapolis", 44.98, -93.27, "MN", CanadianPacific),
        station("DEN", "Denver", 39.74, -104.99, "CO", UnionPacific),
        station("DAL", "Dallas", 32.78, -96.80, "TX", Bnsf),
        station("HOU", "Houston", 29.76, -95.37, "TX", UnionPacific),
        station("MEM", "Memphis", 35.15, -90.05, "TN", CanadianNational),
        station("ATL", "Atlanta", 33.75, -84.39, "GA", NorfolkSouthern),
        station("JAX", "Jacksonville", 30.33, -81.66, "FL", Csx),
        station("NOL", "New Orleans", 29.95, -90.07, "LA", CanadianNational),
        station("LAX", "Los Angeles", 34.05, -118.24, "CA", Bnsf),
        station("OAK", "Oakland", 37.80, -122.27, "CA", UnionPacific),
        station("SEA", "Seattle", 47.61, -122.33, "WA", Bnsf),
        station("POR", "Portland", 45.52, -122.68, "OR", UnionPacific),
        station("SLC", "Salt Lake City", 40.76, -111.89, "UT", UnionPacific),
        station("ABQ", "Albuquerque", 35.08, -106.65, "NM", Bnsf),
        station("ELP", "El Paso", 31.76, -106.49, "TX", UnionPacific),
        station("NYC", "New York", 40.71, -74.01, "NY", Csx),
        station("DET", "Detroit", 42.33, -83.05, "MI", CanadianNational),
        station("TOR", "Toronto", 43.65, -79.38, "ON", CanadianNational),
        station("WPG", "Winnipeg", 49.90, -97.14, "MB", CanadianPacific),
        station("MTL", "Montreal", 45.50, -73.57, "QC", CanadianNational),
        station("LRD", "Laredo", 27.51, -99.51, "TX", KansasCitySouthern),
    ];

    let connections = vec![
        // BNSF transcon and northern tier
        connection("CHI", "KC", 500.0, Bnsf, 3.0, &["IL", "MO"]),
        connection("KC", "ABQ", 780.0, Bnsf, 5.0, &["KS", "OK", "TX", "NM"]),
        connection("ABQ", "LAX", 810.0, Bnsf, 7.0, &["NM", "AZ", "CA"]),
        connection("CHI", "MSP", 430.0, Bnsf, 3.0, &["IL", "WI", "MN"]),
        connection("MSP", "SEA", 1660.0, Bnsf, 6.0, &["MN", "ND", "MT", "ID", "WA"]),
        connection("KC", "DAL", 550.0, Bnsf, 4.0, &["KS", "OK", "TX"]),
        connection("SEA", "POR", 185.0, Bnsf, 4.0, &["WA", "OR"]),
        connection("KC", "DEN", 640.0, Bnsf, 4.0, &["KS", "CO"]),
        // Union Pacific
        connection("CHI", "STL", 300.0, UnionPacific, 3.0, &["IL", "MO"]),
        connection("STL", "KC", 280.0, UnionPacific, 3.0, &["MO"]),
        connection("DEN", "SLC", 570.0, UnionPacific, 8.0, &["CO", "UT"]),
        connection("SLC", "OAK", 740.0, UnionPacific, 7.0, &["UT", "NV", "CA"]),
        connection("DAL", "ELP", 620.0, UnionPacific, 5.0, &["TX"]),
        connection("ELP", "LAX", 800.0, UnionPacific, 6.0, &["TX", "NM", "AZ", "CA"]),
        connection("STL", "DAL", 630.0, UnionPacific, 4.0, &["MO", "AR", "TX"]),
        connection("DAL", "HOU", 250.0, UnionPacific, 2.0, &["TX"]),
        connection("POR", "OAK", 710.0, UnionPacific, 7.0, &["OR", "CA"]),
        connection("DEN", "CHI", 1000.0, UnionPacific, 3.0, &["CO", "NE", "IA", "IL"]),
        connection("POR", "SLC", 780.0, UnionPacific, 6.0, &["OR", "ID", "UT"]),
        // CSX
        connection("NYC", "JAX", 940.0, Csx, 4.0, &["NY", "NJ", "MD", "VA", "NC", "SC", "GA", "FL"]),
        connection("JAX", "ATL", 350.0, Csx, 3.0, &["FL", "GA"]),
        connection("ATL", "NOL", 480.0, Csx, 4.0, &["GA", "AL", "MS", "LA"]),
        connection("CHI", "NYC", 960.0, Csx, 5.0, &["IL", "IN", "OH", "PA", "NY"]),
        // Norfolk Southern
        connection("CHI", "ATL", 730.0, NorfolkSouthern, 4.0, &["IL", "IN", "KY", "TN", "GA"]),
        connection("ATL", "NYC", 870.0, NorfolkSouthern, 5.0, &["GA", "SC", "NC", "VA", "MD", "PA", "NJ", "NY"]),
        connection("MEM", "ATL", 390.0, NorfolkSouthern, 4.0, &["TN", "MS", "AL", "GA"]),
        connection("CHI", "DET", 280.0, NorfolkSouthern, 3.0, &["IL", "IN", "MI"]),
        // Canadian National
        connection("CHI", "MEM", 530.0, CanadianNational, 3.0, &["IL", "KY", "TN"]),
        connection("MEM", "NOL", 400.0, CanadianNational, 3.0, &["TN", "MS", "LA"]),
        connection("DET", "TOR", 230.0, CanadianNational, 3.0, &["MI", "ON"]),
        connection("TOR", "MTL", 335.0, CanadianNational, 2.0, &["ON", "QC"]),
        connection("CHI", "WPG", 840.0, CanadianNational, 4.0, &["IL", "WI", "MN", "MB"]),
        // Canadian Pacific; MSP-CHI is a parallel edge to the BNSF line above
        connection("MSP", "WPG", 460.0, CanadianPacific, 3.0, &["MN", "MB"]),
        connection("CHI", "MTL", 850.0, CanadianPacific, 5.0, &["IL", "IN", "MI", "ON", "QC"]),
        connection("MSP", "CHI", 410.0, CanadianPacific, 3.0, &["MN", "WI", "IL"]),
        // Kansas City Southern
        connection("KC", "HOU", 760.0, KansasCitySouthern, 5.0, &["MO", "KS", "OK", "TX"]),
        connection("HOU", "LRD", 320.0, KansasCitySouthern, 3.0, &["TX"]),
        connection("DAL", "LRD", 430.0, KansasCitySouthern, 4.0, &["TX"]),
        connection("KC", "NOL", 870.0, KansasCitySouthern, 5.0, &["MO", "AR", "LA"]),
    ];

    RailNetwork::new(stations, connections).expect("built-in network is valid")
});

impl RailNetwork {
    /// Built-in North American sample network.
    pub fn north_america() -> &'static RailNetwork {
        &NORTH_AMERICA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_network_loads() {
        let network = RailNetwork::north_america();
        assert_eq!(network.stations.len(), 24);
        assert!(network.connections.len() >= 35);
    }

    #[test]
    fn chicago_kansas_city_mainline_is_500_miles() {
        let network = RailNetwork::north_america();
        let edge = network
            .connections
            .iter()
            .find(|c| c.links("CHI", "KC"))
            .expect("CHI-KC edge present");
        assert_eq!(edge.distance_miles, 500.0);
        assert_eq!(edge.operator, Operator::Bnsf);
    }

    #[test]
    fn chicago_minneapolis_is_a_parallel_edge_pair() {
        let network = RailNetwork::north_america();
        let operators: Vec<Operator> = network
            .connections
            .iter()
            .filter(|c| c.links("CHI", "MSP"))
            .map(|c| c.operator)
            .collect();
        assert!(operators.contains(&Operator::Bnsf));
        assert!(operators.contains(&Operator::CanadianPacific));
    }
}
