//! Vehicle records, the catalog store and CSV import

mod data;
pub mod catalog;
pub mod loader;

pub use data::Vehicle;
pub use catalog::{Catalog, DEFAULT_CATALOG_PATH};
pub use loader::{load_vehicles, load_vehicles_from_reader};
