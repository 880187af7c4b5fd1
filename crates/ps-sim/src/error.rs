//! Error types for simulation operations.

use ps_core::CoreError;
use thiserror::Error;

/// Errors encountered while configuring or running a simulation.
///
/// Numerical blow-up (NaN, unbounded growth) is deliberately not represented
/// here: it shows up in the returned trajectory values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::DimensionMismatch {
                what,
                expected,
                actual,
            } => SimError::DimensionMismatch {
                what,
                expected,
                actual,
            },
            CoreError::NonFinite { what, .. } | CoreError::InvalidArg { what } => {
                SimError::InvalidConfig { what }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_dimension_mismatch_stays_distinct() {
        let err: SimError = CoreError::DimensionMismatch {
            what: "derivative",
            expected: 2,
            actual: 1,
        }
        .into();
        assert!(matches!(err, SimError::DimensionMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn core_argument_errors_become_config_errors() {
        let err: SimError = CoreError::NonFinite {
            what: "t_end",
            value: f64::NAN,
        }
        .into();
        assert_eq!(err, SimError::InvalidConfig { what: "t_end" });
        assert!(err.to_string().contains("t_end"));
    }
}
