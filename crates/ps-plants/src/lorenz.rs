//! Lorenz system.

use crate::common::check_positive;
use crate::error::PlantResult;
use ps_core::State;
use ps_sim::Plant;

/// Lorenz convection model, state `[x, y, z]`.
///
/// ```text
/// x' = sigma * (y - x)
/// y' = x * (rho - z) - y
/// z' = x * y - beta * z
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Lorenz {
    pub const DIM: usize = 3;

    pub fn new(sigma: f64, rho: f64, beta: f64) -> PlantResult<Self> {
        Ok(Self {
            sigma: check_positive(sigma, "sigma")?,
            rho: check_positive(rho, "rho")?,
            beta: check_positive(beta, "beta")?,
        })
    }

    /// Parameters of Lorenz's 1963 paper (chaotic regime).
    pub fn classic() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl Plant for Lorenz {
    fn derivative(&self, s: &State) -> State {
        let (x, y, z) = (s[0], s[1], s[2]);
        State::from([
            self.sigma * (y - x),
            x * (self.rho - z) - y,
            x * y - self.beta * z,
        ])
    }

    fn name(&self) -> &str {
        "lorenz"
    }

    fn dimension(&self) -> Option<usize> {
        Some(Self::DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_an_equilibrium() {
        let plant = Lorenz::classic();
        assert_eq!(plant.derivative(&State::zeros(3)), State::zeros(3));
    }

    #[test]
    fn nontrivial_equilibria() {
        // (±sqrt(beta (rho - 1)), ±sqrt(beta (rho - 1)), rho - 1)
        let plant = Lorenz::classic();
        let c = (plant.beta * (plant.rho - 1.0)).sqrt();
        let xdot = plant.derivative(&State::from([c, c, plant.rho - 1.0]));
        assert!(xdot.max_abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Lorenz::new(10.0, 0.0, 1.0).is_err());
        assert!(Lorenz::new(f64::NAN, 28.0, 1.0).is_err());
    }
}
