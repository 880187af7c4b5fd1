//! Scenario schema definitions.

use ps_core::units::constants::G0_MPS2;
use ps_sim::IntegratorType;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// One simulation run described in a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub integrator: IntegratorType,
    pub time: TimeDef,
    pub initial_state: Vec<f64>,
    pub plant: PlantDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    pub num_steps: usize,
    pub t_end_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlantDef {
    Pendulum {
        #[serde(default = "default_gravity")]
        gravity_mps2: f64,
        length_m: f64,
        #[serde(default = "default_mass")]
        mass_kg: f64,
        #[serde(default)]
        friction: f64,
    },
    HarmonicOscillator {
        omega_rad_s: f64,
    },
    ExponentialDecay {
        rate_per_s: f64,
    },
    Lorenz {
        #[serde(default = "default_sigma")]
        sigma: f64,
        #[serde(default = "default_rho")]
        rho: f64,
        #[serde(default = "default_beta")]
        beta: f64,
    },
}

impl PlantDef {
    /// Stable kind label, matching the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            PlantDef::Pendulum { .. } => "pendulum",
            PlantDef::HarmonicOscillator { .. } => "harmonic_oscillator",
            PlantDef::ExponentialDecay { .. } => "exponential_decay",
            PlantDef::Lorenz { .. } => "lorenz",
        }
    }
}

fn default_version() -> u32 {
    LATEST_VERSION
}

fn default_gravity() -> f64 {
    G0_MPS2
}

fn default_mass() -> f64 {
    1.0
}

fn default_sigma() -> f64 {
    10.0
}

fn default_rho() -> f64 {
    28.0
}

fn default_beta() -> f64 {
    8.0 / 3.0
}
