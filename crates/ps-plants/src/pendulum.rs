//! Damped simple pendulum.

use crate::common::{check_non_negative, check_positive};
use crate::error::PlantResult;
use ps_core::State;
use ps_core::units::{Accel, Length, Mass};
use ps_sim::Plant;

/// Point-mass pendulum on a rigid massless rod with linear friction.
///
/// State layout: `[theta, theta_dot]`, angle in radians measured from the
/// downward vertical.
///
/// ```text
/// theta'     = theta_dot
/// theta_dot' = -(g / l) * sin(theta) - f * theta_dot
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pendulum {
    /// Gravitational acceleration (m/s^2)
    pub gravity: f64,
    /// Rod length (m)
    pub length: f64,
    /// Bob mass (kg). Does not enter the dynamics, only the energy.
    pub mass: f64,
    /// Linear friction coefficient (1/s)
    pub friction: f64,
}

impl Pendulum {
    pub const DIM: usize = 2;

    pub fn new(gravity: f64, length: f64, mass: f64, friction: f64) -> PlantResult<Self> {
        Ok(Self {
            gravity: check_positive(gravity, "gravity")?,
            length: check_positive(length, "length")?,
            mass: check_positive(mass, "mass")?,
            friction: check_non_negative(friction, "friction")?,
        })
    }

    /// Create a frictionless pendulum.
    pub fn frictionless(gravity: f64, length: f64, mass: f64) -> PlantResult<Self> {
        Self::new(gravity, length, mass, 0.0)
    }

    /// Create a pendulum from dimensioned quantities.
    pub fn from_units(gravity: Accel, length: Length, mass: Mass, friction: f64) -> PlantResult<Self> {
        Self::new(gravity.value, length.value, mass.value, friction)
    }

    /// Natural angular frequency of small oscillations, `sqrt(g / l)`.
    pub fn natural_frequency(&self) -> f64 {
        (self.gravity / self.length).sqrt()
    }

    /// Total mechanical energy (J), zero when hanging at rest.
    pub fn energy(&self, state: &State) -> f64 {
        let (theta, omega) = (state[0], state[1]);
        let kinetic = 0.5 * self.mass * (self.length * omega).powi(2);
        let potential = self.mass * self.gravity * self.length * (1.0 - theta.cos());
        kinetic + potential
    }
}

impl Plant for Pendulum {
    fn derivative(&self, state: &State) -> State {
        let (theta, omega) = (state[0], state[1]);
        State::from([
            omega,
            -(self.gravity / self.length) * theta.sin() - self.friction * omega,
        ])
    }

    fn name(&self) -> &str {
        "pendulum"
    }

    fn dimension(&self) -> Option<usize> {
        Some(Self::DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlantError;
    use ps_core::units::{kg, m, mps2};
    use ps_core::{Tolerances, nearly_equal};

    #[test]
    fn derivative_matches_equations_of_motion() {
        let p = Pendulum::new(9.81, 2.0, 1.0, 0.5).unwrap();
        let theta = 0.3;
        let omega = -1.2;
        let xdot = p.derivative(&State::from([theta, omega]));

        assert_eq!(xdot.len(), 2);
        assert_eq!(xdot[0], omega);
        let expected = -(9.81 / 2.0) * f64::sin(theta) - 0.5 * omega;
        assert!(nearly_equal(xdot[1], expected, Tolerances::default()));
    }

    #[test]
    fn hanging_at_rest_is_equilibrium() {
        let p = Pendulum::frictionless(9.81, 1.0, 1.0).unwrap();
        assert_eq!(p.derivative(&State::zeros(2)), State::zeros(2));
        assert_eq!(p.energy(&State::zeros(2)), 0.0);
    }

    #[test]
    fn energy_of_swinging_bob() {
        let p = Pendulum::frictionless(10.0, 1.0, 2.0).unwrap();
        // Horizontal, at rest: m g l.
        let e = p.energy(&State::from([std::f64::consts::FRAC_PI_2, 0.0]));
        assert!(nearly_equal(e, 20.0, Tolerances::default()));
        // Bottom, moving: 0.5 m (l w)^2.
        assert!(nearly_equal(p.energy(&State::from([0.0, 3.0])), 9.0, Tolerances::default()));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            Pendulum::new(9.81, 0.0, 1.0, 0.0),
            Err(PlantError::InvalidArg { what: "length" })
        );
        assert!(Pendulum::new(f64::NAN, 1.0, 1.0, 0.0).is_err());
        assert!(Pendulum::new(9.81, 1.0, 1.0, -0.1).is_err());
    }

    #[test]
    fn from_units_matches_plain_constructor() {
        let a = Pendulum::from_units(mps2(9.81), m(1.5), kg(0.2), 0.1).unwrap();
        let b = Pendulum::new(9.81, 1.5, 0.2, 0.1).unwrap();
        assert_eq!(a, b);
        assert!(nearly_equal(b.natural_frequency(), (9.81_f64 / 1.5).sqrt(), Tolerances::default()));
    }
}
