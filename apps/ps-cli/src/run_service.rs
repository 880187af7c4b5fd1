//! Run execution and caching.

use std::path::Path;
use std::time::Instant;

use ps_results::{RunManifest, RunStore, compute_run_id, records_from_trajectory};
use ps_scenario::Scenario;
use ps_sim::{IntegratorType, SimProgress, Trajectory};

use crate::error::CliResult;

pub const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
    /// Overrides the scenario's integrator when set.
    pub integrator: Option<IntegratorType>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: SOLVER_VERSION.to_string(),
            integrator: None,
        }
    }
}

/// Wall-clock breakdown of one request.
#[derive(Debug, Clone, Default)]
pub struct RunTiming {
    pub simulate_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub trajectory: Trajectory,
    pub loaded_from_cache: bool,
    pub timing: RunTiming,
}

/// Execute or load a run.
pub fn ensure_run(scenario_path: &Path, options: &RunOptions) -> CliResult<RunResponse> {
    ensure_run_with_progress(scenario_path, options, None)
}

/// Execute or load a run, reporting integration progress.
pub fn ensure_run_with_progress(
    scenario_path: &Path,
    options: &RunOptions,
    progress_cb: Option<&mut dyn FnMut(SimProgress)>,
) -> CliResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTiming::default();

    let mut scenario = ps_scenario::load(scenario_path)?;
    if let Some(integrator) = options.integrator {
        scenario = scenario.with_integrator(integrator);
    }

    let run_id = compute_run_id(&scenario, &options.solver_version)?;
    let store = RunStore::for_scenario(scenario_path)?;

    if options.use_cache && store.has_run(&run_id) {
        let load_started = Instant::now();
        let (manifest, trajectory) = store.load_run(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();

        tracing::info!(run_id = %run_id, "loaded cached run");
        return Ok(RunResponse {
            run_id,
            manifest,
            trajectory,
            loaded_from_cache: true,
            timing,
        });
    }

    let sim_started = Instant::now();
    let trajectory = execute(&scenario, progress_cb)?;
    timing.simulate_time_s = sim_started.elapsed().as_secs_f64();

    let save_started = Instant::now();
    let manifest = RunManifest::new(run_id.clone(), &scenario, &options.solver_version)?;
    store.save_run(&manifest, &records_from_trajectory(&trajectory))?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    tracing::info!(run_id = %run_id, samples = trajectory.len(), "run saved");
    Ok(RunResponse {
        run_id,
        manifest,
        trajectory,
        loaded_from_cache: false,
        timing,
    })
}

fn execute(
    scenario: &Scenario,
    progress_cb: Option<&mut dyn FnMut(SimProgress)>,
) -> CliResult<Trajectory> {
    let sim = scenario.build_simulation()?;
    let trajectory = match progress_cb {
        Some(cb) => sim.simulate_with_progress(cb)?,
        None => sim.simulate()?,
    };
    Ok(trajectory)
}

/// Load a stored run by ID.
pub fn load_run(scenario_path: &Path, run_id: &str) -> CliResult<(RunManifest, Trajectory)> {
    Ok(RunStore::for_scenario(scenario_path)?.load_run(run_id)?)
}

/// Stored runs for the scenario at `scenario_path`.
pub fn list_runs(scenario_path: &Path) -> CliResult<Vec<RunManifest>> {
    let scenario = ps_scenario::load(scenario_path)?;
    let store = RunStore::for_scenario(scenario_path)?;
    Ok(store.list_runs(&scenario.name)?)
}

/// Run every built-in integrator on the same scenario, without caching.
pub fn compare(scenario_path: &Path) -> CliResult<Vec<(IntegratorType, Trajectory)>> {
    let scenario = ps_scenario::load(scenario_path)?;
    IntegratorType::ALL
        .iter()
        .map(|&integrator| {
            let trajectory = execute(&scenario.clone().with_integrator(integrator), None)?;
            Ok((integrator, trajectory))
        })
        .collect()
}
