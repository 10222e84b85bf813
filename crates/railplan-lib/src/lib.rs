//! Railplan library entry points.
//!
//! This crate models a North American rail network, finds candidate routes
//! between terminals, scores rail cars for a piece of freight, analyzes the
//! combined center of gravity, and blends everything into a compliance
//! probability with cost and transit-time estimates. Higher-level consumers
//! (the CLI, a UI) should only depend on the functions exported here instead
//! of reimplementing behavior.

#![deny(warnings)]

mod builtin;
pub mod car;
pub mod cog;
pub mod compliance;
pub mod error;
pub mod estimate;
pub mod graph;
pub mod network;
pub mod route;
pub mod search;
pub mod store;

pub use car::{
    best_car, recommend_cars, CarCatalog, CarRecommendation, CarType, FitUtilization,
    FreightSpec, UnitSystem,
};
pub use cog::{analyze_center_of_gravity, CgAnalysis, CgPoint, Placement, CAR_EMPTY_WEIGHT_LB};
pub use compliance::{
    calculate_compliance, operator_rules, ComplianceCategory, ComplianceFactor,
    ComplianceResult, OperatorRules, Recommendation, RecommendationPriority,
};
pub use error::{Error, Result};
pub use estimate::{
    estimate_route_cost, estimate_transit_time, operator_rate, operator_speed, CostEstimate,
    Season, TransitEstimate,
};
pub use graph::{build_graph, Graph};
pub use network::{Connection, Operator, RailNetwork, Station};
pub use route::{Route, RouteSegment, TransferPoint};
pub use search::{find_routes, RoutePreferences};
pub use store::{MemoryStore, SubmissionStore};
