//! Integration test: frictionless pendulum near the bottom equilibrium.
//!
//! Setup: g = 9.81, l = 1, f = 0, x0 = [0, 1e-4], 1000 steps over 10 s.
//!
//! Trends:
//! - RK4 keeps the swing amplitude and energy essentially constant
//! - Euler, on identical inputs, pumps energy in and the amplitude grows.
//!   Each step scales the amplitude by sqrt(1 + (w dt)^2) ~ 1.00049, so
//!   about 1.5x between the first and last 2 s and 2.7x in energy overall.

use ps_plants::{HarmonicOscillator, Pendulum};
use ps_sim::{Integrator, IntegratorType, Simulation, State, TimeSpec, Trajectory};

fn run(integrator: IntegratorType) -> (Pendulum, Trajectory) {
    let pendulum = Pendulum::frictionless(9.81, 1.0, 1.0).expect("valid pendulum");
    let time = TimeSpec::new(1000, 10.0).expect("valid horizon");
    let sim = Simulation::new(integrator, pendulum.clone(), State::from([0.0, 0.0001]), time)
        .expect("valid simulation");
    let traj = sim.simulate().expect("simulation runs");
    (pendulum, traj)
}

/// Peak |theta| over the samples whose time lies in `[from, to)`.
fn peak_angle(traj: &Trajectory, from: f64, to: f64) -> f64 {
    traj.samples()
        .filter(|(t, _)| *t >= from && *t < to)
        .map(|(_, s)| s[0].abs())
        .fold(0.0, f64::max)
}

#[test]
fn rk4_holds_amplitude_and_energy() {
    let (pendulum, traj) = run(IntegratorType::Rk4);

    assert_eq!(traj.len(), 1001);
    assert!(traj.is_bounded(1.0));

    let early = peak_angle(&traj, 0.0, 2.0);
    let late = peak_angle(&traj, 8.0, 10.0);
    let ratio = late / early;
    assert!(
        (0.99..1.01).contains(&ratio),
        "RK4 amplitude ratio {ratio} (early {early:e}, late {late:e})"
    );

    let e0 = pendulum.energy(traj.initial_state().unwrap());
    let e1 = pendulum.energy(traj.final_state().unwrap());
    assert!(((e1 - e0) / e0).abs() < 1e-3, "RK4 energy drift {e0} -> {e1}");
}

#[test]
fn euler_amplitude_grows() {
    let (pendulum, traj) = run(IntegratorType::Euler);

    let early = peak_angle(&traj, 0.0, 2.0);
    let late = peak_angle(&traj, 8.0, 10.0);
    assert!(
        (1.3..1.7).contains(&(late / early)),
        "Euler amplitude should grow: early {early:e}, late {late:e}"
    );

    let e0 = pendulum.energy(traj.initial_state().unwrap());
    let e1 = pendulum.energy(traj.final_state().unwrap());
    assert!(e1 > 2.0 * e0, "Euler energy should grow: {e0} -> {e1}");
    assert!(e1 < 3.0 * e0, "Euler energy grew faster than (1 + (w dt)^2)^n: {e0} -> {e1}");
}

#[test]
fn methods_diverge_on_identical_inputs() {
    let (_, rk4) = run(IntegratorType::Rk4);
    let (_, euler) = run(IntegratorType::Euler);

    assert_eq!(rk4.times(), euler.times());
    assert_eq!(rk4.initial_state(), euler.initial_state());

    let rk4_peak = rk4.max_abs_component(0).unwrap();
    let euler_peak = euler.max_abs_component(0).unwrap();
    assert!(euler_peak > 1.3 * rk4_peak);
}

#[test]
fn small_angle_pendulum_tracks_linear_oscillator() {
    let (pendulum, traj) = run(IntegratorType::Rk4);
    let linear = HarmonicOscillator::new(pendulum.natural_frequency()).unwrap();
    let x0 = traj.initial_state().unwrap();

    for (t, s) in traj.samples().step_by(50) {
        let exact = linear.exact(x0, t);
        // sin(theta) ~ theta to within theta^3 / 6 at these amplitudes.
        assert!((s[0] - exact[0]).abs() < 1e-9, "t = {t}: {} vs {}", s[0], exact[0]);
    }
}

#[test]
fn time_grid_covers_horizon() {
    let (_, traj) = run(IntegratorType::Rk4);
    let times = traj.times();
    assert_eq!(times[0], 0.0);
    assert!((times[1000] - 10.0).abs() < 1e-9);
    assert!(times.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(IntegratorType::Rk4.name(), "rk4");
}
