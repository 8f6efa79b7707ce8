//! Cost curves and their interpolation onto ownership years

mod point;
mod interpolate;

pub use point::{ControlPoint, CostCurve};
pub use interpolate::interpolate;
