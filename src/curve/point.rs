//! Control points and cost curves

use serde::{Deserialize, Serialize};

use crate::error::CurveParseError;

/// A known cost at a specific year of ownership
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Ownership year (0 = first year)
    pub year: u32,
    /// Cost for that year
    pub cost: f64,
}

impl ControlPoint {
    pub fn new(year: u32, cost: f64) -> Self {
        Self { year, cost }
    }
}

/// Sparse set of control points describing how a recurring cost changes
/// over the vehicle's life.
///
/// Points are kept in the order they were supplied; interpolation sorts its
/// own working copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostCurve {
    points: Vec<ControlPoint>,
}

impl CostCurve {
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self { points }
    }

    /// Build a curve from `(year, cost)` pairs
    pub fn from_pairs(pairs: &[(u32, f64)]) -> Self {
        Self {
            points: pairs
                .iter()
                .map(|&(year, cost)| ControlPoint::new(year, cost))
                .collect(),
        }
    }

    /// Decode the stored form: a JSON list of `[year, cost]` pairs,
    /// e.g. `[[0, 14000], [5, 11000], [15, 6500]]`.
    pub fn parse(text: &str) -> Result<Self, CurveParseError> {
        let pairs: Vec<(u32, f64)> = serde_json::from_str(text)?;

        if let Some(&(year, cost)) = pairs.iter().find(|(_, cost)| !cost.is_finite()) {
            return Err(CurveParseError::NonFiniteCost { year, cost });
        }

        Ok(Self::from_pairs(&pairs))
    }

    /// Encode into the stored `[[year, cost], ...]` form
    pub fn to_stored(&self) -> String {
        let pairs: Vec<(u32, f64)> = self.points.iter().map(|p| (p.year, p.cost)).collect();
        // A Vec of (u32, f64) always serializes
        serde_json::to_string(&pairs).unwrap_or_else(|_| String::from("[]"))
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<ControlPoint>> for CostCurve {
    fn from(points: Vec<ControlPoint>) -> Self {
        Self::new(points)
    }
}
