//! Turning a validated scenario into a runnable simulation.

use crate::ScenarioResult;
use crate::schema::{PlantDef, Scenario};
use ps_core::State;
use ps_plants::{ExponentialDecay, HarmonicOscillator, Lorenz, Pendulum, PlantResult};
use ps_sim::{IntegratorType, Plant, SimResult, Simulation, TimeSpec};

/// Simulation type produced from scenario files.
pub type ScenarioSimulation = Simulation<IntegratorType, Box<dyn Plant>>;

impl PlantDef {
    /// Construct the plant, validating its parameters.
    pub fn build(&self) -> PlantResult<Box<dyn Plant>> {
        let plant: Box<dyn Plant> = match *self {
            PlantDef::Pendulum {
                gravity_mps2,
                length_m,
                mass_kg,
                friction,
            } => Box::new(Pendulum::new(gravity_mps2, length_m, mass_kg, friction)?),
            PlantDef::HarmonicOscillator { omega_rad_s } => {
                Box::new(HarmonicOscillator::new(omega_rad_s)?)
            }
            PlantDef::ExponentialDecay { rate_per_s } => {
                Box::new(ExponentialDecay::new(rate_per_s)?)
            }
            PlantDef::Lorenz { sigma, rho, beta } => Box::new(Lorenz::new(sigma, rho, beta)?),
        };
        Ok(plant)
    }

    /// State length the plant requires, if fixed.
    pub fn dimension(&self) -> Option<usize> {
        match self {
            PlantDef::Pendulum { .. } => Some(Pendulum::DIM),
            PlantDef::HarmonicOscillator { .. } => Some(HarmonicOscillator::DIM),
            PlantDef::ExponentialDecay { .. } => None,
            PlantDef::Lorenz { .. } => Some(Lorenz::DIM),
        }
    }
}

impl Scenario {
    pub fn time_spec(&self) -> SimResult<TimeSpec> {
        TimeSpec::new(self.time.num_steps, self.time.t_end_s)
    }

    pub fn initial(&self) -> State {
        State::from(self.initial_state.clone())
    }

    /// Same scenario with a different integration method.
    pub fn with_integrator(mut self, integrator: IntegratorType) -> Self {
        self.integrator = integrator;
        self
    }

    /// Build the configured simulation.
    pub fn build_simulation(&self) -> ScenarioResult<ScenarioSimulation> {
        let plant = self.plant.build()?;
        let time = self.time_spec()?;
        let sim = Simulation::new(self.integrator, plant, self.initial(), time)?;
        tracing::debug!(
            scenario = %self.name,
            plant = self.plant.kind(),
            integrator = ?self.integrator,
            "built simulation"
        );
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScenarioError;
    use crate::schema::{LATEST_VERSION, TimeDef};

    fn decay_scenario() -> Scenario {
        Scenario {
            version: LATEST_VERSION,
            name: "decay".to_string(),
            description: None,
            integrator: IntegratorType::Rk4,
            time: TimeDef {
                num_steps: 100,
                t_end_s: 1.0,
            },
            initial_state: vec![1.0, 2.0, 3.0],
            plant: PlantDef::ExponentialDecay { rate_per_s: 1.0 },
        }
    }

    #[test]
    fn builds_and_runs() {
        let sim = decay_scenario().build_simulation().unwrap();
        let traj = sim.simulate().unwrap();
        assert_eq!(traj.len(), 101);
        assert_eq!(traj.state_dim(), 3);
        assert_eq!(sim.plant().name(), "exponential_decay");
    }

    #[test]
    fn bad_plant_parameters_surface_as_plant_errors() {
        let mut scenario = decay_scenario();
        scenario.plant = PlantDef::HarmonicOscillator { omega_rad_s: -1.0 };
        assert!(matches!(
            scenario.build_simulation(),
            Err(ScenarioError::Plant(_))
        ));
    }

    #[test]
    fn bad_horizon_surfaces_as_sim_error() {
        let mut scenario = decay_scenario();
        scenario.time.num_steps = 0;
        assert!(matches!(
            scenario.build_simulation(),
            Err(ScenarioError::Sim(_))
        ));
    }

    #[test]
    fn with_integrator_switches_method() {
        let scenario = decay_scenario().with_integrator(IntegratorType::Euler);
        let sim = scenario.build_simulation().unwrap();
        assert_eq!(*sim.integrator(), IntegratorType::Euler);
    }
}
