//! On-disk run cache.
//!
//! Each run gets a directory named by its run ID:
//!
//! ```text
//! <root>/<run_id>/manifest.json     RunManifest, pretty JSON
//! <root>/<run_id>/timeseries.jsonl  one SampleRecord per line
//! ```
//!
//! The manifest is written after the time series, so a directory without a
//! manifest is an interrupted save and is treated as absent.

use crate::codec::{read_records, write_records};
use crate::types::{RunManifest, SampleRecord, trajectory_from_records};
use crate::{ResultsError, ResultsResult};
use ps_sim::Trajectory;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const TIMESERIES_FILE: &str = "timeseries.jsonl";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    /// Open (creating if needed) a store rooted at `root_dir`.
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store kept beside a scenario file, in `<scenario dir>/.plantsim/runs`.
    pub fn for_scenario(scenario_path: &Path) -> ResultsResult<Self> {
        let scenario_dir = scenario_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: format!("{} has no parent directory", scenario_path.display()),
            })?;
        Self::new(scenario_dir.join(".plantsim").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_path(&self, run_id: &str, file: &str) -> PathBuf {
        self.root_dir.join(run_id).join(file)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_path(run_id, MANIFEST_FILE).is_file()
    }

    pub fn save_run(&self, manifest: &RunManifest, records: &[SampleRecord]) -> ResultsResult<()> {
        fs::create_dir_all(self.root_dir.join(&manifest.run_id))?;

        let timeseries = File::create(self.run_path(&manifest.run_id, TIMESERIES_FILE))?;
        write_records(BufWriter::new(timeseries), records)?;

        let mut manifest_file =
            BufWriter::new(File::create(self.run_path(&manifest.run_id, MANIFEST_FILE))?);
        serde_json::to_writer_pretty(&mut manifest_file, manifest)?;
        manifest_file.flush()?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let file = self.open(run_id, MANIFEST_FILE)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<SampleRecord>> {
        let file = self.open(run_id, TIMESERIES_FILE)?;
        read_records(BufReader::new(file))
    }

    /// Manifest and rebuilt trajectory of a stored run.
    pub fn load_run(&self, run_id: &str) -> ResultsResult<(RunManifest, Trajectory)> {
        let manifest = self.load_manifest(run_id)?;
        let trajectory = trajectory_from_records(self.load_timeseries(run_id)?)?;
        Ok((manifest, trajectory))
    }

    /// Complete runs of the named scenario, oldest first.
    pub fn list_runs(&self, scenario_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().into_owned();
            match self.load_manifest(&run_id) {
                Ok(manifest) if manifest.scenario_name == scenario_name => runs.push(manifest),
                // Interrupted saves and foreign directories.
                Ok(_) | Err(ResultsError::RunNotFound { .. } | ResultsError::Json(_)) => {}
                Err(e) => return Err(e),
            }
        }
        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    /// Remove a run. Removing a run that is not stored is not an error.
    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        match fs::remove_dir_all(self.root_dir.join(run_id)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn open(&self, run_id: &str, file: &str) -> ResultsResult<File> {
        File::open(self.run_path(run_id, file)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            },
            _ => e.into(),
        })
    }
}
