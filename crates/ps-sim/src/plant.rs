//! Plant trait for pluggable dynamic systems.

use std::sync::Arc;

use crate::error::{SimError, SimResult};
use ps_core::State;

/// A system whose dynamics are given by a state-derivative function.
///
/// A Plant must implement:
/// - `derivative`: `x_dot = f(x)`, returning a state of the same length as `x`
///
/// `derivative` is a pure function of the state and the plant's fixed
/// parameters. It must not depend on call history or wall-clock time;
/// time-varying systems carry time as a state component instead.
///
/// Plants are `Send + Sync` so one instance can drive many concurrent runs.
pub trait Plant: Send + Sync {
    /// Compute the instantaneous rate of change of each state component.
    fn derivative(&self, state: &State) -> State;

    /// Plant name for logging.
    fn name(&self) -> &str {
        "plant"
    }

    /// Number of state components this plant expects, if fixed.
    ///
    /// When declared, the driver rejects initial states of any other length.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

impl<P: Plant + ?Sized> Plant for &P {
    fn derivative(&self, state: &State) -> State {
        (**self).derivative(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}

impl<P: Plant + ?Sized> Plant for Box<P> {
    fn derivative(&self, state: &State) -> State {
        (**self).derivative(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}

impl<P: Plant + ?Sized> Plant for Arc<P> {
    fn derivative(&self, state: &State) -> State {
        (**self).derivative(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}

/// Evaluate `plant.derivative(state)` and check the result has the input's length.
///
/// Every integrator funnels derivative calls through here so a malformed
/// plant is reported as [`SimError::DimensionMismatch`] at the first bad call.
pub fn evaluate<P: Plant + ?Sized>(plant: &P, state: &State) -> SimResult<State> {
    let xdot = plant.derivative(state);
    if xdot.len() != state.len() {
        return Err(SimError::DimensionMismatch {
            what: "plant derivative",
            expected: state.len(),
            actual: xdot.len(),
        });
    }
    Ok(xdot)
}

/// Plant backed by a closure.
///
/// ```
/// use ps_sim::{FnPlant, Plant, State};
///
/// let decay = FnPlant::new("decay", |s: &State| s.scale(-0.5));
/// assert_eq!(decay.derivative(&State::from([2.0])), State::from([-1.0]));
/// ```
pub struct FnPlant<F> {
    name: String,
    dimension: Option<usize>,
    f: F,
}

impl<F> FnPlant<F>
where
    F: Fn(&State) -> State + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            dimension: None,
            f,
        }
    }

    /// Declare the expected state length.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

impl<F> Plant for FnPlant<F>
where
    F: Fn(&State) -> State + Send + Sync,
{
    fn derivative(&self, state: &State) -> State {
        (self.f)(state)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

impl<F> std::fmt::Debug for FnPlant<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPlant")
            .field("name", &self.name)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_passes_matching_lengths() {
        let plant = FnPlant::new("shift", |s: &State| s.iter().map(|v| v + 1.0).collect());
        let xdot = evaluate(&plant, &State::from([1.0, 2.0])).unwrap();
        assert_eq!(xdot, State::from([2.0, 3.0]));
    }

    #[test]
    fn evaluate_catches_short_derivative() {
        let plant = FnPlant::new("broken", |_: &State| State::zeros(1));
        let err = evaluate(&plant, &State::zeros(3)).unwrap_err();
        assert_eq!(
            err,
            SimError::DimensionMismatch {
                what: "plant derivative",
                expected: 3,
                actual: 1,
            }
        );
    }

    #[test]
    fn wrappers_forward_metadata() {
        let plant = FnPlant::new("wrapped", |s: &State| s.clone()).with_dimension(2);
        let boxed: Box<dyn Plant> = Box::new(plant);
        assert_eq!(boxed.name(), "wrapped");
        assert_eq!(boxed.dimension(), Some(2));

        let shared: Arc<dyn Plant> = Arc::from(boxed);
        let by_ref = &shared;
        assert_eq!(by_ref.name(), "wrapped");
        assert_eq!(
            by_ref.derivative(&State::from([1.0, 2.0])),
            State::from([1.0, 2.0])
        );
    }
}
