//! Recorded simulation output.

use ps_core::{Real, State};

/// Time series produced by one simulation run.
///
/// `times` and `states` are parallel: `states[i]` is the state after `i`
/// steps, reached at `times[i]`. Both hold `num_steps + 1` entries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    times: Vec<Real>,
    states: Vec<State>,
}

impl Trajectory {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, t: Real, state: State) {
        self.times.push(t);
        self.states.push(state);
    }

    /// Rebuild a trajectory from stored parallel sequences.
    ///
    /// Returns `None` if the sequences are empty or differ in length.
    pub fn from_parts(times: Vec<Real>, states: Vec<State>) -> Option<Self> {
        if times.is_empty() || times.len() != states.len() {
            return None;
        }
        Some(Self { times, states })
    }

    /// Number of samples (`num_steps + 1`).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[Real] {
        &self.times
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// `(t, state)` pairs in time order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = (Real, &State)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    pub fn initial_state(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn final_state(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn final_time(&self) -> Option<Real> {
        self.times.last().copied()
    }

    /// Length of every stored state.
    pub fn state_dim(&self) -> usize {
        self.states.first().map_or(0, State::len)
    }

    /// Series of one state component across the run.
    pub fn component(&self, index: usize) -> Option<Vec<Real>> {
        if index >= self.state_dim() {
            return None;
        }
        Some(self.states.iter().map(|s| s[index]).collect())
    }

    /// Peak absolute value of one component across the run.
    pub fn max_abs_component(&self, index: usize) -> Option<Real> {
        self.component(index)
            .map(|series| series.iter().fold(0.0, |acc: Real, v| acc.max(v.abs())))
    }

    /// Index of the first sample containing a NaN or infinite component.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.states.iter().position(|s| !s.is_finite())
    }

    /// True if every component of every sample is finite and within `limit`.
    pub fn is_bounded(&self, limit: Real) -> bool {
        self.states
            .iter()
            .all(|s| s.is_finite() && s.max_abs() <= limit)
    }

    pub fn into_parts(self) -> (Vec<Real>, Vec<State>) {
        (self.times, self.states)
    }
}
