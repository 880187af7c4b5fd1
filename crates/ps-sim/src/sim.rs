//! Simulation driver and progress reporting.

use crate::error::{SimError, SimResult};
use crate::integrator::Integrator;
use crate::plant::Plant;
use crate::time::TimeSpec;
use crate::trajectory::Trajectory;
use ps_core::State;

/// Progress snapshot emitted once per accepted step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimProgress {
    pub step: usize,
    pub num_steps: usize,
    pub time_s: f64,
    pub fraction_complete: f64,
}

/// One configured run: integrator, plant, initial state and horizon.
///
/// Construction validates the configuration; [`Simulation::simulate`] only
/// reads it, so the same value can be run again for identical output.
#[derive(Clone, Debug)]
pub struct Simulation<I, P> {
    integrator: I,
    plant: P,
    initial_state: State,
    time: TimeSpec,
}

impl<I: Integrator, P: Plant> Simulation<I, P> {
    pub fn new(integrator: I, plant: P, initial_state: State, time: TimeSpec) -> SimResult<Self> {
        if initial_state.is_empty() {
            return Err(SimError::InvalidConfig {
                what: "initial state must have at least one component",
            });
        }
        if !initial_state.is_finite() {
            return Err(SimError::InvalidConfig {
                what: "initial state must be finite",
            });
        }
        if let Some(expected) = plant.dimension() {
            initial_state.ensure_len(expected, "initial state")?;
        }

        Ok(Self {
            integrator,
            plant,
            initial_state,
            time,
        })
    }

    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    pub fn plant(&self) -> &P {
        &self.plant
    }

    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    pub fn time(&self) -> &TimeSpec {
        &self.time
    }

    /// Run the full horizon and return the trajectory.
    pub fn simulate(&self) -> SimResult<Trajectory> {
        self.run(None)
    }

    /// Run the full horizon, reporting progress after every step.
    pub fn simulate_with_progress(
        &self,
        mut progress: impl FnMut(SimProgress),
    ) -> SimResult<Trajectory> {
        let cb: &mut dyn FnMut(SimProgress) = &mut progress;
        self.run(Some(cb))
    }

    fn run(&self, mut progress: Option<&mut dyn FnMut(SimProgress)>) -> SimResult<Trajectory> {
        let num_steps = self.time.num_steps();
        let dt = self.time.dt();

        tracing::debug!(
            plant = self.plant.name(),
            integrator = self.integrator.name(),
            num_steps,
            dt,
            state_dim = self.initial_state.len(),
            "starting simulation"
        );

        let mut record = Trajectory::with_capacity(num_steps + 1);
        record.push(0.0, self.initial_state.clone());

        let mut x = self.initial_state.clone();
        let mut warned_non_finite = false;

        for step in 1..=num_steps {
            x = self
                .integrator
                .advance(&self.plant, &x, dt)
                .inspect_err(|e| tracing::error!(step, error = %e, "step failed"))?;
            let t = self.time.time_at(step);

            if !warned_non_finite && !x.is_finite() {
                warned_non_finite = true;
                tracing::warn!(
                    step,
                    t,
                    integrator = self.integrator.name(),
                    "state became non-finite; continuing, inspect the trajectory"
                );
            }

            record.push(t, x.clone());

            if let Some(cb) = progress.as_deref_mut() {
                cb(SimProgress {
                    step,
                    num_steps,
                    time_s: t,
                    fraction_complete: step as f64 / num_steps as f64,
                });
            }
        }

        tracing::debug!(
            samples = record.len(),
            t_end = self.time.t_end(),
            "simulation finished"
        );

        Ok(record)
    }
}
