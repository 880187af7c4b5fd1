//! Common parameter checks shared by the plant constructors.

use crate::error::{PlantError, PlantResult};
use ps_core::numeric::{ensure_finite, ensure_positive};

/// Ensure a parameter is finite, returning PlantError if not.
pub fn check_finite(value: f64, what: &'static str) -> PlantResult<f64> {
    ensure_finite(value, what).map_err(|_| PlantError::NonPhysical { what })
}

/// Ensure a parameter is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> PlantResult<f64> {
    Ok(ensure_positive(value, what)?)
}

/// Ensure a parameter is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> PlantResult<f64> {
    let value = check_finite(value, what)?;
    if value < 0.0 {
        return Err(PlantError::InvalidArg { what });
    }
    Ok(value)
}
