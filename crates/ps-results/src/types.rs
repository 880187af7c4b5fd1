//! Result data types.

use crate::{ResultsError, ResultsResult};
use ps_core::State;
use ps_scenario::Scenario;
use ps_sim::{Integrator, IntegratorType, TimeSpec, Trajectory};
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub integrator: IntegratorType,
    pub num_steps: usize,
    pub t_end_s: f64,
    pub dt_s: f64,
    pub state_dim: usize,
    pub solver_version: String,
}

impl RunManifest {
    /// Manifest for a fresh run of `scenario`, stamped with the current UTC time.
    pub fn new(run_id: RunId, scenario: &Scenario, solver_version: &str) -> ResultsResult<Self> {
        let time = scenario.time_spec()?;
        Ok(Self {
            run_id,
            scenario_name: scenario.name.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            integrator: scenario.integrator,
            num_steps: time.num_steps(),
            t_end_s: time.t_end(),
            dt_s: time.dt(),
            state_dim: scenario.initial_state.len(),
            solver_version: solver_version.to_string(),
        })
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }

    /// Time grid the run was recorded on.
    pub fn time_spec(&self) -> ResultsResult<TimeSpec> {
        Ok(TimeSpec::new(self.num_steps, self.t_end_s)?)
    }
}

/// One stored sample: time and the full state at that time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleRecord {
    pub time_s: f64,
    #[serde(
        serialize_with = "crate::codec::serialize_state",
        deserialize_with = "crate::codec::deserialize_state"
    )]
    pub state: State,
}

pub fn records_from_trajectory(trajectory: &Trajectory) -> Vec<SampleRecord> {
    trajectory
        .samples()
        .map(|(t, s)| SampleRecord {
            time_s: t,
            state: s.clone(),
        })
        .collect()
}

pub fn trajectory_from_records(records: Vec<SampleRecord>) -> ResultsResult<Trajectory> {
    let (times, states): (Vec<f64>, Vec<State>) =
        records.into_iter().map(|r| (r.time_s, r.state)).unzip();

    let dim = states.first().map_or(0, State::len);
    if states.iter().any(|s| s.len() != dim) {
        return Err(ResultsError::InvalidRecords {
            what: "samples have differing state lengths",
        });
    }

    Trajectory::from_parts(times, states).ok_or(ResultsError::InvalidRecords {
        what: "no samples",
    })
}

/// Summary statistics over a stored run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub record_count: usize,
    pub time_range: (f64, f64),
    pub state_dim: usize,
    pub final_state: State,
    pub peak_abs: Vec<f64>,
    pub first_non_finite: Option<usize>,
}

pub fn summarize(trajectory: &Trajectory) -> RunSummary {
    let dim = trajectory.state_dim();
    RunSummary {
        record_count: trajectory.len(),
        time_range: (
            trajectory.times().first().copied().unwrap_or(0.0),
            trajectory.final_time().unwrap_or(0.0),
        ),
        state_dim: dim,
        final_state: trajectory.final_state().cloned().unwrap_or_default(),
        peak_abs: (0..dim)
            .filter_map(|i| trajectory.max_abs_component(i))
            .collect(),
        first_non_finite: trajectory.first_non_finite(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trajectory() -> Trajectory {
        Trajectory::from_parts(
            vec![0.0, 0.1, 0.2],
            vec![
                State::from([1.0, 0.0]),
                State::from([0.9, -0.4]),
                State::from([0.7, -0.8]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn records_rebuild_the_trajectory() {
        let traj = trajectory();
        let records = records_from_trajectory(&traj);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].time_s, 0.1);
        assert_eq!(trajectory_from_records(records).unwrap(), traj);
    }

    #[test]
    fn ragged_records_are_rejected() {
        let records = vec![
            SampleRecord {
                time_s: 0.0,
                state: State::from([1.0]),
            },
            SampleRecord {
                time_s: 1.0,
                state: State::from([1.0, 2.0]),
            },
        ];
        assert!(matches!(
            trajectory_from_records(records),
            Err(ResultsError::InvalidRecords { .. })
        ));
        assert!(trajectory_from_records(Vec::new()).is_err());
    }

    #[test]
    fn sample_record_json_shape() {
        let record = SampleRecord {
            time_s: 0.5,
            state: State::from([1.0, -2.0]),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"time_s":0.5,"state":[1.0,-2.0]}"#);
    }

    #[test]
    fn summary_reports_peaks() {
        let summary = summarize(&trajectory());
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.time_range, (0.0, 0.2));
        assert_eq!(summary.peak_abs, vec![1.0, 0.8]);
        assert_eq!(summary.final_state, State::from([0.7, -0.8]));
        assert_eq!(summary.first_non_finite, None);
    }
}
