//! Fixed-step simulation engine for plantsim.
//!
//! Provides:
//! - `Plant` capability: a pure state-derivative function
//! - `Integrator` capability with explicit Euler and classical RK4 rules
//! - `TimeSpec` horizon (step count + end time, fixed `dt`)
//! - `Simulation` driver producing a `Trajectory`
//! - Parallel batch runs over independent initial states

pub mod batch;
pub mod error;
pub mod integrator;
pub mod plant;
pub mod sim;
pub mod time;
pub mod trajectory;

// Re-exports for public API
pub use batch::simulate_batch;
pub use error::{SimError, SimResult};
pub use integrator::{Euler, Integrator, IntegratorType, RK4};
pub use plant::{FnPlant, Plant};
pub use ps_core::State;
pub use sim::{SimProgress, Simulation};
pub use time::TimeSpec;
pub use trajectory::Trajectory;
