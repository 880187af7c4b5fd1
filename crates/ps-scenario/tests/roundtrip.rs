use ps_scenario::{
    PlantDef, Scenario, ScenarioError, TimeDef, load, load_json, load_yaml, save_json, save_yaml,
};
use ps_sim::IntegratorType;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    std::fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn lorenz() -> Scenario {
    Scenario {
        version: 1,
        name: "lorenz".to_string(),
        description: Some("chaotic".to_string()),
        integrator: IntegratorType::Euler,
        time: TimeDef {
            num_steps: 500,
            t_end_s: 5.0,
        },
        initial_state: vec![1.0, 0.0, 0.0],
        plant: PlantDef::Lorenz {
            sigma: 10.0,
            rho: 28.0,
            beta: 2.5,
        },
    }
}

#[test]
fn roundtrip_yaml() {
    let dir = unique_temp_dir("ps_scenario_yaml");
    let path = dir.join("lorenz.yaml");

    save_yaml(&path, &lorenz()).unwrap();
    assert_eq!(load_yaml(&path).unwrap(), lorenz());
    assert_eq!(load(&path).unwrap(), lorenz());
}

#[test]
fn roundtrip_json() {
    let dir = unique_temp_dir("ps_scenario_json");
    let path = dir.join("lorenz.json");

    save_json(&path, &lorenz()).unwrap();
    assert_eq!(load_json(&path).unwrap(), lorenz());
    assert_eq!(load(&path).unwrap(), lorenz());
}

#[test]
fn invalid_scenario_is_not_saved() {
    let dir = unique_temp_dir("ps_scenario_invalid");
    let path = dir.join("bad.yaml");

    let mut bad = lorenz();
    bad.initial_state = vec![1.0];

    assert!(matches!(
        save_yaml(&path, &bad),
        Err(ScenarioError::Validation(_))
    ));
    assert!(!path.exists());
}

#[test]
fn missing_file_is_io_error() {
    let dir = unique_temp_dir("ps_scenario_missing");
    assert!(matches!(
        load_yaml(&dir.join("nope.yaml")),
        Err(ScenarioError::Io(_))
    ));
}
