//! Ownership Cost - multi-year total cost of ownership projections for vehicles
//!
//! This library provides:
//! - Piecewise linear cost curves (insurance, maintenance) over ownership years
//! - Fixed-rate loan amortization
//! - Yearly cost breakdowns with totals and average monthly cost
//! - A JSON-file vehicle catalog with CSV import
//! - Scenario runs comparing many vehicles

pub mod error;
pub mod curve;
pub mod projection;
pub mod vehicle;
pub mod scenario;

// Re-export commonly used types
pub use curve::{ControlPoint, CostCurve, interpolate};
pub use error::{CatalogError, CostError, CurveParseError};
pub use projection::{project, OwnershipSettings, ProjectionEngine, SettingsOverrides, YearlyBreakdown};
pub use scenario::ScenarioRunner;
pub use vehicle::{Catalog, Vehicle};
