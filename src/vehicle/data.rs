//! Vehicle records as stored in the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::curve::CostCurve;
use crate::error::CurveParseError;

/// A stored vehicle, identified by its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique name, e.g. "Tesla Model 3 Long Range"
    pub name: String,

    /// Purchase price
    pub cost: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_permit_cost: Option<f64>,

    /// Insurance curve in stored `[[year, cost], ...]` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_points: Option<String>,

    /// Maintenance curve in stored `[[year, cost], ...]` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_points: Option<String>,

    /// Last time the record was inserted or updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            yearly_permit_cost: None,
            insurance_points: None,
            maintenance_points: None,
            updated_at: None,
        }
    }

    /// Store the given curves in their serialized form
    pub fn with_curves(mut self, insurance: Option<&CostCurve>, maintenance: Option<&CostCurve>) -> Self {
        self.insurance_points = insurance.map(CostCurve::to_stored);
        self.maintenance_points = maintenance.map(CostCurve::to_stored);
        self
    }

    pub fn with_permit_cost(mut self, yearly_permit_cost: f64) -> Self {
        self.yearly_permit_cost = Some(yearly_permit_cost);
        self
    }

    /// Decode the stored insurance curve, if any
    pub fn insurance_curve(&self) -> Result<Option<CostCurve>, CurveParseError> {
        parse_stored(self.insurance_points.as_deref())
    }

    /// Decode the stored maintenance curve, if any
    pub fn maintenance_curve(&self) -> Result<Option<CostCurve>, CurveParseError> {
        parse_stored(self.maintenance_points.as_deref())
    }
}

fn parse_stored(text: Option<&str>) -> Result<Option<CostCurve>, CurveParseError> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => CostCurve::parse(text).map(Some),
    }
}
