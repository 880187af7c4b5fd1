//! Simulation horizon.

use crate::error::{SimError, SimResult};
use ps_core::Real;
use ps_core::units::Time;

/// Fixed-step horizon: `num_steps` steps covering `[0, t_end]`.
///
/// The step size `dt = t_end / num_steps` is derived once and held fixed
/// for the whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTimeSpec", into = "RawTimeSpec")
)]
pub struct TimeSpec {
    num_steps: usize,
    t_end: Real,
    dt: Real,
}

impl TimeSpec {
    /// Build a horizon, rejecting `num_steps < 1`, `t_end <= 0` and non-finite `t_end`.
    pub fn new(num_steps: usize, t_end: Real) -> SimResult<Self> {
        if num_steps < 1 {
            return Err(SimError::InvalidConfig {
                what: "num_steps must be at least 1",
            });
        }
        if !t_end.is_finite() {
            return Err(SimError::InvalidConfig {
                what: "t_end must be finite",
            });
        }
        if t_end <= 0.0 {
            return Err(SimError::InvalidConfig {
                what: "t_end must be positive",
            });
        }

        let dt = t_end / num_steps as Real;
        // Underflow guard for absurd step counts.
        if dt <= 0.0 {
            return Err(SimError::InvalidConfig {
                what: "dt must be positive",
            });
        }

        Ok(Self {
            num_steps,
            t_end,
            dt,
        })
    }

    /// Build a horizon from a dimensioned duration.
    pub fn from_duration(t_end: Time, num_steps: usize) -> SimResult<Self> {
        use uom::si::time::second;
        Self::new(num_steps, t_end.get::<second>())
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn t_end(&self) -> Real {
        self.t_end
    }

    /// Fixed step size.
    pub fn dt(&self) -> Real {
        self.dt
    }

    /// Time after `step` steps: `step * dt`.
    pub fn time_at(&self, step: usize) -> Real {
        step as Real * self.dt
    }

    /// The `num_steps + 1` grid points `0, dt, ..., num_steps * dt`.
    pub fn times(&self) -> impl ExactSizeIterator<Item = Real> + '_ {
        (0..self.num_steps + 1).map(move |i| self.time_at(i))
    }
}

/// Wire form of [`TimeSpec`]; validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawTimeSpec {
    num_steps: usize,
    t_end_s: Real,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTimeSpec> for TimeSpec {
    type Error = SimError;

    fn try_from(raw: RawTimeSpec) -> SimResult<Self> {
        TimeSpec::new(raw.num_steps, raw.t_end_s)
    }
}

#[cfg(feature = "serde")]
impl From<TimeSpec> for RawTimeSpec {
    fn from(spec: TimeSpec) -> Self {
        RawTimeSpec {
            num_steps: spec.num_steps,
            t_end_s: spec.t_end,
        }
    }
}
