//! Error types for plant construction.

use ps_core::CoreError;
use thiserror::Error;

/// Errors raised when a plant is built from invalid parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type PlantResult<T> = Result<T, PlantError>;

impl From<CoreError> for PlantError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, .. } => PlantError::NonPhysical { what },
            CoreError::InvalidArg { what } | CoreError::DimensionMismatch { what, .. } => {
                PlantError::InvalidArg { what }
            }
        }
    }
}
