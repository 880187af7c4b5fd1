//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::plant::{Plant, evaluate};
use ps_core::State;

/// Trait for time integrators.
///
/// Integrators are stateless stepping rules: everything a step needs arrives
/// as arguments, so one instance can be shared across runs and threads.
pub trait Integrator: Send + Sync {
    /// Advance `state` by one step of size `dt` using the plant's derivative.
    ///
    /// `dt` is validated upstream by [`crate::TimeSpec`]; integrators do not
    /// re-check it. Returns [`crate::SimError::DimensionMismatch`] if the plant
    /// produces a derivative of the wrong length.
    fn advance<P: Plant + ?Sized>(&self, plant: &P, state: &State, dt: f64) -> SimResult<State>;

    /// Short method name for logs and run manifests.
    fn name(&self) -> &'static str;

    /// Global order of accuracy.
    fn order(&self) -> u32;

    /// Number of derivative evaluations per step.
    fn evaluations_per_step(&self) -> usize;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RK4;

impl Integrator for RK4 {
    fn advance<P: Plant + ?Sized>(&self, plant: &P, x: &State, dt: f64) -> SimResult<State> {
        debug_assert!(dt > 0.0, "dt must be positive");
        let half = 0.5 * dt;

        let k1 = evaluate(plant, x)?;

        let x2 = x.add_scaled(&k1, half)?;
        let k2 = evaluate(plant, &x2)?;

        let x3 = x.add_scaled(&k2, half)?;
        let k3 = evaluate(plant, &x3)?;

        let x4 = x.add_scaled(&k3, dt)?;
        let k4 = evaluate(plant, &x4)?;

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum: State = k1
            .iter()
            .zip(k2.iter())
            .zip(k3.iter())
            .zip(k4.iter())
            .map(|(((a, b), c), d)| a + 2.0 * b + 2.0 * c + d)
            .collect();

        Ok(x.add_scaled(&k_sum, dt / 6.0)?)
    }

    fn name(&self) -> &'static str {
        "rk4"
    }

    fn order(&self) -> u32 {
        4
    }

    fn evaluations_per_step(&self) -> usize {
        4
    }
}

/// Forward Euler (explicit, 1st order).
/// Calls the derivative once per step instead of 4 times (RK4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euler;

impl Integrator for Euler {
    fn advance<P: Plant + ?Sized>(&self, plant: &P, x: &State, dt: f64) -> SimResult<State> {
        debug_assert!(dt > 0.0, "dt must be positive");
        let xdot = evaluate(plant, x)?;
        Ok(x.add_scaled(&xdot, dt)?)
    }

    fn name(&self) -> &'static str {
        "euler"
    }

    fn order(&self) -> u32 {
        1
    }

    fn evaluations_per_step(&self) -> usize {
        1
    }
}

/// Integrator selection for configuration files and the CLI.
///
/// Dispatches to the unit integrators. The driver itself is generic over
/// [`Integrator`], so custom rules never need a variant here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 derivative calls per step).
    #[default]
    Rk4,
    /// Forward Euler (1st-order, 1 derivative call per step).
    Euler,
}

impl IntegratorType {
    pub const ALL: [IntegratorType; 2] = [IntegratorType::Euler, IntegratorType::Rk4];

    /// Parse a method name as written in logs and manifests.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rk4" | "runge-kutta" | "runge_kutta" => Some(IntegratorType::Rk4),
            "euler" | "forward_euler" | "forward-euler" => Some(IntegratorType::Euler),
            _ => None,
        }
    }
}

impl Integrator for IntegratorType {
    fn advance<P: Plant + ?Sized>(&self, plant: &P, x: &State, dt: f64) -> SimResult<State> {
        match self {
            IntegratorType::Rk4 => RK4.advance(plant, x, dt),
            IntegratorType::Euler => Euler.advance(plant, x, dt),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            IntegratorType::Rk4 => RK4.name(),
            IntegratorType::Euler => Euler.name(),
        }
    }

    fn order(&self) -> u32 {
        match self {
            IntegratorType::Rk4 => RK4.order(),
            IntegratorType::Euler => Euler.order(),
        }
    }

    fn evaluations_per_step(&self) -> usize {
        match self {
            IntegratorType::Rk4 => RK4.evaluations_per_step(),
            IntegratorType::Euler => Euler.evaluations_per_step(),
        }
    }
}

impl<I: Integrator> Integrator for &I {
    fn advance<P: Plant + ?Sized>(&self, plant: &P, x: &State, dt: f64) -> SimResult<State> {
        (**self).advance(plant, x, dt)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn order(&self) -> u32 {
        (**self).order()
    }

    fn evaluations_per_step(&self) -> usize {
        (**self).evaluations_per_step()
    }
}
