//! Scenario validation logic.

use crate::schema::{LATEST_VERSION, Scenario};
use ps_plants::PlantError;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Initial state has {actual} components but plant {plant} needs {expected}")]
    DimensionMismatch {
        plant: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid plant parameters: {0}")]
    Plant(#[from] PlantError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Check everything that can be checked without stepping.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", scenario.name),
            reason: "must not be empty".to_string(),
        });
    }

    if let Err(e) = scenario.time_spec() {
        return Err(ValidationError::InvalidValue {
            field: "time".to_string(),
            value: format!(
                "num_steps={}, t_end_s={}",
                scenario.time.num_steps, scenario.time.t_end_s
            ),
            reason: e.to_string(),
        });
    }

    if scenario.initial_state.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "initial_state".to_string(),
            value: "[]".to_string(),
            reason: "must have at least one component".to_string(),
        });
    }

    for (i, v) in scenario.initial_state.iter().enumerate() {
        if !v.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("initial_state[{i}]"),
                value: v.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    scenario.plant.build()?;

    if let Some(expected) = scenario.plant.dimension()
        && expected != scenario.initial_state.len()
    {
        return Err(ValidationError::DimensionMismatch {
            plant: scenario.plant.kind(),
            expected,
            actual: scenario.initial_state.len(),
        });
    }

    Ok(())
}
