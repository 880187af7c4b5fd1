use std::path::PathBuf;

#[test]
fn bundled_scenarios_load_and_run() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    let scenarios = [
        "scenarios/pendulum_small_angle.yaml",
        "scenarios/pendulum_damped.yaml",
        "scenarios/lorenz.yaml",
        "scenarios/harmonic.json",
    ];

    for rel in scenarios {
        let path = root.join(rel);
        let scenario = ps_scenario::load(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
        let sim = scenario
            .build_simulation()
            .unwrap_or_else(|e| panic!("Failed to build {}: {}", path.display(), e));
        let traj = sim
            .simulate()
            .unwrap_or_else(|e| panic!("Failed to run {}: {}", path.display(), e));
        assert_eq!(traj.len(), scenario.time.num_steps + 1, "{}", rel);
        assert_eq!(traj.state_dim(), scenario.initial_state.len(), "{}", rel);
    }
}
