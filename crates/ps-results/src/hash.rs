//! Content-based hashing for run IDs.

use crate::ResultsResult;
use ps_scenario::Scenario;
use sha2::{Digest, Sha256};

/// Hex SHA-256 over the scenario and solver version.
///
/// Runs are deterministic, so equal IDs mean equal trajectories.
pub fn compute_run_id(scenario: &Scenario, solver_version: &str) -> ResultsResult<String> {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_vec(scenario)?;
    hasher.update(&scenario_json);

    // Separator so ("ab", "c") and ("a", "bc") cannot collide.
    hasher.update([0u8]);
    hasher.update(solver_version.as_bytes());

    Ok(format!("{:x}", hasher.finalize()))
}
