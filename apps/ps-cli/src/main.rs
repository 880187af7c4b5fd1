mod error;
mod run_service;

use clap::{Parser, Subcommand};
use ps_results::summarize;
use ps_sim::{Integrator, IntegratorType, SimProgress, Trajectory};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};
use crate::run_service::{RunOptions, RunTiming};

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "PlantSim CLI - fixed-step simulation of dynamical plants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and parameters
    Validate {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
    },
    /// Run a simulation
    Run {
        /// Path to the scenario file (YAML or JSON)
        scenario_path: PathBuf,
        /// Integration method, overriding the scenario (euler, rk4)
        #[arg(long, value_parser = parse_integrator)]
        integrator: Option<IntegratorType>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Do not draw the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export the trajectory of a run as CSV
    Export {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Export only this state component
        #[arg(long)]
        component: Option<usize>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run every integrator on the same scenario and compare
    Compare {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
}

fn parse_integrator(name: &str) -> Result<IntegratorType, String> {
    IntegratorType::from_name(name).ok_or_else(|| format!("unknown integrator '{name}'"))
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            integrator,
            no_cache,
            quiet,
        } => cmd_run(&scenario_path, integrator, !no_cache, quiet),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::ShowRun {
            scenario_path,
            run_id,
        } => cmd_show_run(&scenario_path, &run_id),
        Commands::Export {
            scenario_path,
            run_id,
            component,
            output,
        } => cmd_export(&scenario_path, &run_id, component, output.as_deref()),
        Commands::Compare { scenario_path } => cmd_compare(&scenario_path),
    }
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = ps_scenario::load(scenario_path)?;
    // Building catches plant dimension mismatches as well.
    scenario.build_simulation()?;
    println!(
        "✓ Scenario '{}' is valid ({} plant, {} state components)",
        scenario.name,
        scenario.plant.kind(),
        scenario.initial_state.len()
    );
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    integrator: Option<IntegratorType>,
    use_cache: bool,
    quiet: bool,
) -> CliResult<()> {
    println!("Running scenario: {}", scenario_path.display());

    let options = RunOptions {
        use_cache,
        integrator,
        ..RunOptions::default()
    };

    let response = if quiet {
        run_service::ensure_run(scenario_path, &options)?
    } else {
        let mut last_emit = Instant::now();
        let mut last_fraction = -1.0f64;
        let cb: &mut dyn FnMut(SimProgress) = &mut |p: SimProgress| {
            let emit_now = (p.fraction_complete - last_fraction).abs() >= 0.005
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&p);
                last_fraction = p.fraction_complete;
                last_emit = Instant::now();
            }
        };
        let response = run_service::ensure_run_with_progress(scenario_path, &options, Some(cb))?;
        clear_progress_line();
        response
    };

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }
    println!(
        "  Integrator: {}  dt = {:.6} s",
        response.manifest.integrator_name(),
        response.manifest.dt_s
    );

    print_timing_summary(&response.timing);
    print_trajectory_summary(&response.trajectory);
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(p: &SimProgress) {
    let width = 28usize;
    let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  t={:.3}s  step={}/{}",
        bar,
        p.fraction_complete * 100.0,
        p.time_s,
        p.step,
        p.num_steps
    );
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &RunTiming) {
    println!("\nTiming summary:");
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    } else {
        println!("  Simulate: {:.3}s", timing.simulate_time_s);
        println!("  Save:     {:.3}s", timing.save_time_s);
    }
    println!("  Total:    {:.3}s", timing.total_time_s);
}

fn print_trajectory_summary(trajectory: &Trajectory) {
    let summary = summarize(trajectory);
    println!("\nTrajectory:");
    println!("  Samples: {}", summary.record_count);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!("  Final state: {}", summary.final_state);
    for (i, peak) in summary.peak_abs.iter().enumerate() {
        println!("  max |x{}| = {:.6e}", i, peak);
    }
    match summary.first_non_finite {
        Some(step) => println!("  ! State became non-finite at sample {}", step),
        None => println!("  All samples finite"),
    }
}

fn cmd_runs(scenario_path: &Path) -> CliResult<()> {
    let runs = run_service::list_runs(scenario_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", scenario_path.display());
    } else {
        println!("Cached runs for '{}':", runs[0].scenario_name);
        for manifest in runs {
            println!(
                "  {} ({}, {}, {} steps)",
                manifest.run_id,
                manifest.timestamp,
                manifest.integrator_name(),
                manifest.num_steps
            );
        }
    }
    Ok(())
}

fn cmd_show_run(scenario_path: &Path, run_id: &str) -> CliResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, trajectory) = run_service::load_run(scenario_path, run_id)?;

    println!("\nRun:");
    println!("  Scenario: {}", manifest.scenario_name);
    println!("  Created: {}", manifest.timestamp);
    println!("  Integrator: {}", manifest.integrator_name());
    println!(
        "  Steps: {}  t_end = {:.3} s  dt = {:.6} s",
        manifest.num_steps,
        manifest.t_end_s,
        manifest.dt_s
    );
    println!("  State dimension: {}", manifest.state_dim);
    println!("  Solver version: {}", manifest.solver_version);

    print_trajectory_summary(&trajectory);
    Ok(())
}

fn cmd_export(
    scenario_path: &Path,
    run_id: &str,
    component: Option<usize>,
    output: Option<&Path>,
) -> CliResult<()> {
    let (_manifest, trajectory) = run_service::load_run(scenario_path, run_id)?;

    if let Some(index) = component
        && index >= trajectory.state_dim()
    {
        return Err(CliError::InvalidInput(format!(
            "component {} out of range for state dimension {}",
            index,
            trajectory.state_dim()
        )));
    }

    let csv = trajectory_csv(&trajectory, component);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} samples to {}",
            trajectory.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn trajectory_csv(trajectory: &Trajectory, component: Option<usize>) -> String {
    let columns: Vec<usize> = match component {
        Some(index) => vec![index],
        None => (0..trajectory.state_dim()).collect(),
    };

    let mut csv = String::from("time_s");
    for i in &columns {
        csv.push_str(&format!(",x{}", i));
    }
    csv.push('\n');

    for (t, state) in trajectory.samples() {
        csv.push_str(&format!("{}", t));
        for &i in &columns {
            csv.push_str(&format!(",{}", state[i]));
        }
        csv.push('\n');
    }
    csv
}

fn cmd_compare(scenario_path: &Path) -> CliResult<()> {
    println!("Comparing integrators on: {}", scenario_path.display());

    for (integrator, trajectory) in run_service::compare(scenario_path)? {
        let summary = summarize(&trajectory);
        println!("\n{}:", integrator.name());
        println!("  Final state: {}", summary.final_state);
        for (i, peak) in summary.peak_abs.iter().enumerate() {
            println!("  max |x{}| = {:.6e}", i, peak);
        }
        if let Some(step) = summary.first_non_finite {
            println!("  ! State became non-finite at sample {}", step);
        }
    }
    Ok(())
}
