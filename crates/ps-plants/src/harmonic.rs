//! Undamped linear oscillator with a closed-form solution.

use crate::common::check_positive;
use crate::error::PlantResult;
use ps_core::State;
use ps_sim::Plant;

/// `x'' = -omega^2 x`, state `[x, v]`.
///
/// Serves as the reference problem for accuracy checks: [`Self::exact`]
/// gives the true solution at any time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicOscillator {
    /// Angular frequency (rad/s)
    pub omega: f64,
}

impl HarmonicOscillator {
    pub const DIM: usize = 2;

    pub fn new(omega: f64) -> PlantResult<Self> {
        Ok(Self {
            omega: check_positive(omega, "omega")?,
        })
    }

    /// Exact state at time `t` starting from `initial`.
    pub fn exact(&self, initial: &State, t: f64) -> State {
        let (x0, v0) = (initial[0], initial[1]);
        let (sin, cos) = (self.omega * t).sin_cos();
        State::from([
            x0 * cos + v0 / self.omega * sin,
            -x0 * self.omega * sin + v0 * cos,
        ])
    }

    /// Energy per unit mass, conserved by the exact flow.
    pub fn energy(&self, state: &State) -> f64 {
        0.5 * (state[1].powi(2) + (self.omega * state[0]).powi(2))
    }
}

impl Plant for HarmonicOscillator {
    fn derivative(&self, state: &State) -> State {
        State::from([state[1], -self.omega * self.omega * state[0]])
    }

    fn name(&self) -> &str {
        "harmonic_oscillator"
    }

    fn dimension(&self) -> Option<usize> {
        Some(Self::DIM)
    }
}
