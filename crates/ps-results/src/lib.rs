//! ps-results: run cache and trajectory storage.

pub mod codec;
pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_run_id;
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Simulation error: {0}")]
    Sim(#[from] ps_sim::SimError),

    #[error("Bad record on line {line}: {source}")]
    BadRecord {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Invalid records: {what}")]
    InvalidRecords { what: &'static str },
}
