//! ps-plants: example plant library for plantsim.
//!
//! Provides ready-made dynamical systems:
//! - Damped pendulum
//! - Harmonic oscillator (with exact solution)
//! - Exponential decay (with exact solution)
//! - Lorenz system
//!
//! All plants implement `ps_sim::Plant` and validate their parameters on
//! construction.
//!
//! # Example
//!
//! ```
//! use ps_plants::Pendulum;
//! use ps_sim::{RK4, Simulation, State, TimeSpec};
//!
//! let pendulum = Pendulum::frictionless(9.81, 1.0, 1.0).unwrap();
//! let time = TimeSpec::new(1000, 10.0).unwrap();
//! let sim = Simulation::new(RK4, pendulum, State::from([0.0, 0.0001]), time).unwrap();
//!
//! let trajectory = sim.simulate().unwrap();
//! assert_eq!(trajectory.len(), 1001);
//! ```

pub mod common;
pub mod decay;
pub mod error;
pub mod harmonic;
pub mod lorenz;
pub mod pendulum;

// Re-exports
pub use decay::ExponentialDecay;
pub use error::{PlantError, PlantResult};
pub use harmonic::HarmonicOscillator;
pub use lorenz::Lorenz;
pub use pendulum::Pendulum;
