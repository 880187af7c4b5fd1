//! First-order exponential decay.

use crate::common::check_non_negative;
use crate::error::PlantResult;
use ps_core::State;
use ps_sim::Plant;

/// `x_i' = -rate * x_i` applied to every component independently.
///
/// Works for any state length, so it declares no fixed dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    /// Decay rate (1/s)
    pub rate: f64,
}

impl ExponentialDecay {
    pub fn new(rate: f64) -> PlantResult<Self> {
        Ok(Self {
            rate: check_non_negative(rate, "rate")?,
        })
    }

    /// Exact state at time `t` starting from `initial`.
    pub fn exact(&self, initial: &State, t: f64) -> State {
        initial.scale((-self.rate * t).exp())
    }
}

impl Plant for ExponentialDecay {
    fn derivative(&self, state: &State) -> State {
        state.scale(-self.rate)
    }

    fn name(&self) -> &str {
        "exponential_decay"
    }
}
