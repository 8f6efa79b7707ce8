//! Load vehicles from CSV for bulk import into the catalog
//!
//! Expected columns: `name,cost,yearly_permit_cost,insurance_points,maintenance_points`.
//! Only `name` and `cost` are required; empty cells are treated as unset.

use csv::{Reader, Trim};
use std::path::Path;

use super::data::Vehicle;
use crate::error::CatalogError;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    cost: f64,
    #[serde(default)]
    yearly_permit_cost: Option<f64>,
    #[serde(default)]
    insurance_points: Option<String>,
    #[serde(default)]
    maintenance_points: Option<String>,
}

impl CsvRow {
    fn to_vehicle(self) -> Vehicle {
        Vehicle {
            name: self.name,
            cost: self.cost,
            yearly_permit_cost: self.yearly_permit_cost,
            insurance_points: self.insurance_points.filter(|s| !s.is_empty()),
            maintenance_points: self.maintenance_points.filter(|s| !s.is_empty()),
            updated_at: None,
        }
    }
}

/// Load all vehicles from a CSV file
pub fn load_vehicles<P: AsRef<Path>>(path: P) -> Result<Vec<Vehicle>, CatalogError> {
    let reader = std::fs::File::open(path)?;
    load_vehicles_from_reader(reader)
}

/// Load vehicles from any reader (e.g., string buffer, stdin)
pub fn load_vehicles_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Vehicle>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<Vehicle>, CatalogError> {
    let mut vehicles = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        vehicles.push(row.to_vehicle());
    }

    Ok(vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_vehicles_from_reader() {
        let data = "\
name,cost,yearly_permit_cost,insurance_points,maintenance_points
Tesla Model 3,42000,1200,\"[[0, 3000], [10, 1800]]\",
Honda Civic,25000,,,\"[[0, 500], [10, 2500]]\"
";
        let vehicles = load_vehicles_from_reader(data.as_bytes()).unwrap();
        assert_eq!(vehicles.len(), 2);

        let tesla = &vehicles[0];
        assert_eq!(tesla.name, "Tesla Model 3");
        assert_eq!(tesla.yearly_permit_cost, Some(1200.0));
        assert_eq!(tesla.insurance_curve().unwrap().unwrap().len(), 2);
        assert_eq!(tesla.maintenance_points, None);

        let civic = &vehicles[1];
        assert_eq!(civic.yearly_permit_cost, None);
        assert_eq!(civic.insurance_points, None);
        assert!(civic.maintenance_curve().unwrap().is_some());
    }

    #[test]
    fn test_missing_cost_is_an_error() {
        let data = "name,cost\nCivic,\n";
        assert!(matches!(
            load_vehicles_from_reader(data.as_bytes()),
            Err(CatalogError::Csv(_))
        ));
    }
}
