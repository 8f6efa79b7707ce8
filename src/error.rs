//! Error types shared across the crate

use thiserror::Error;

/// Precondition failures detected before a projection runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostError {
    #[error("expected lifetime must be at least one year, got {0}")]
    InvalidLifetime(i32),

    #[error("loan term cannot be negative, got {0} years")]
    InvalidLoanTerm(i32),

    #[error("loan rate must be a non-negative finite fraction, got {0}")]
    InvalidRate(f64),

    #[error("{field} must be a finite amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },
}

/// A stored cost curve that could not be decoded
#[derive(Error, Debug)]
pub enum CurveParseError {
    #[error("curve is not a list of [year, cost] pairs: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("curve cost at year {year} is not finite: {cost}")]
    NonFiniteCost { year: u32, cost: f64 },
}

/// Failures raised by the vehicle catalog and its loaders
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vehicle CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no vehicle named '{0}' in the catalog")]
    NotFound(String),

    #[error("invalid vehicle record '{name}': {message}")]
    InvalidRecord { name: String, message: String },
}
