//! Car types, per-operator catalogs, and freight-to-car fit scoring.

mod catalog;
mod recommend;
mod types;

pub use catalog::CarCatalog;
pub use recommend::{best_car, recommend_cars, CarRecommendation, FitUtilization};
pub use types::{CarType, FreightSpec, UnitSystem};
