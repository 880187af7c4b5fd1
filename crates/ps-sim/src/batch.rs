//! Independent runs in parallel.
//!
//! A single run is a strict recurrence and cannot be split, but runs that
//! only share an immutable plant and integrator can. Each run owns its own
//! state sequence; nothing mutable is shared.

use rayon::prelude::*;

use crate::error::SimResult;
use crate::integrator::Integrator;
use crate::plant::Plant;
use crate::sim::Simulation;
use crate::time::TimeSpec;
use crate::trajectory::Trajectory;
use ps_core::State;

/// Simulate one run per initial state, in parallel.
///
/// Results come back in the order of `initial_states`; each entry fails or
/// succeeds on its own.
pub fn simulate_batch<I, P>(
    integrator: &I,
    plant: &P,
    initial_states: &[State],
    time: TimeSpec,
) -> Vec<SimResult<Trajectory>>
where
    I: Integrator,
    P: Plant,
{
    tracing::debug!(
        runs = initial_states.len(),
        integrator = integrator.name(),
        "starting batch"
    );

    initial_states
        .par_iter()
        .map(|x0| Simulation::new(integrator, plant, x0.clone(), time)?.simulate())
        .collect()
}
