//! Error types for the command line front end.

/// Wraps the backend crate errors behind one type for `main`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Scenario error: {0}")]
    Scenario(#[from] ps_scenario::ScenarioError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] ps_sim::SimError),

    #[error("Results error: {0}")]
    Results(#[from] ps_results::ResultsError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
