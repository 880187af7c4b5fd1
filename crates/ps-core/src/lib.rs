//! ps-core: shared foundation for plantsim.
//!
//! Contains:
//! - state (the `State` vector integrated by every solver)
//! - numeric (Real + tolerances + float helpers)
//! - units (uom SI types + constructors)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod state;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use state::State;
