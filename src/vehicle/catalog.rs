//! JSON-file vehicle catalog
//!
//! The catalog is an explicit handle: open it, read or modify records, then
//! `save` or `close` it. Nothing is shared between handles, so a single
//! process should keep at most one writer per file.

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::data::Vehicle;
use crate::error::CatalogError;

/// Default catalog file name
pub const DEFAULT_CATALOG_PATH: &str = "vehicles.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    vehicles: Vec<Vehicle>,
}

/// Keyed vehicle store backed by a JSON file
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    vehicles: Vec<Vehicle>,
    dirty: bool,
}

impl Catalog {
    /// Open the catalog at `path`; a missing file is an empty catalog
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();

        let vehicles = match File::open(&path) {
            Ok(file) => {
                let contents: CatalogFile = serde_json::from_reader(BufReader::new(file))?;
                contents.vehicles
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("catalog {} does not exist yet, starting empty", path.display());
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        debug!("opened catalog {} with {} vehicles", path.display(), vehicles.len());
        Ok(Self {
            path,
            vehicles,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All vehicles, in insertion order
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Look up a vehicle by exact name
    pub fn get(&self, name: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.name == name)
    }

    /// Look up a vehicle by exact name, failing if absent
    pub fn require(&self, name: &str) -> Result<&Vehicle, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Insert a vehicle, or replace the one with the same name.
    ///
    /// Returns true when an existing record was replaced.
    pub fn upsert(&mut self, mut vehicle: Vehicle) -> Result<bool, CatalogError> {
        if vehicle.name.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                name: vehicle.name,
                message: "name cannot be empty".to_string(),
            });
        }
        if !vehicle.cost.is_finite() {
            return Err(CatalogError::InvalidRecord {
                name: vehicle.name,
                message: format!("cost must be finite, got {}", vehicle.cost),
            });
        }

        vehicle.updated_at = Some(Utc::now());
        self.dirty = true;

        match self.vehicles.iter_mut().find(|v| v.name == vehicle.name) {
            Some(existing) => {
                info!("updated vehicle '{}'", vehicle.name);
                *existing = vehicle;
                Ok(true)
            }
            None => {
                info!("added vehicle '{}'", vehicle.name);
                self.vehicles.push(vehicle);
                Ok(false)
            }
        }
    }

    /// Remove a vehicle by exact name, returning it
    pub fn remove(&mut self, name: &str) -> Result<Vehicle, CatalogError> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        self.dirty = true;
        info!("removed vehicle '{}'", name);
        Ok(self.vehicles.remove(index))
    }

    /// Vehicles whose name contains `fragment`, ignoring case, sorted by name
    pub fn search(&self, fragment: &str) -> Vec<&Vehicle> {
        let needle = fragment.to_lowercase();
        let mut matches: Vec<&Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.name.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }

    /// Write pending changes back to the catalog file
    pub fn save(&mut self) -> Result<(), CatalogError> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write to a sibling file first so a failed write leaves the old catalog intact
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            let contents = CatalogFile {
                vehicles: self.vehicles.clone(),
            };
            serde_json::to_writer_pretty(&mut writer, &contents)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        self.dirty = false;
        debug!("saved {} vehicles to {}", self.vehicles.len(), self.path.display());
        Ok(())
    }

    /// Save and release the handle
    pub fn close(mut self) -> Result<(), CatalogError> {
        self.save()
    }
}
