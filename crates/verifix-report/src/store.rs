use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use verifix_core::RunId;
use verifix_eval::Report;

use crate::render::render_transcript;

/// Persists one directory per run with the JSON report and its transcript.
pub trait ReportStore: Send + Sync {
    fn create_run_dir(&self, suite: &str, run_id: &RunId) -> Result<PathBuf>;
    fn write_report(&self, run_dir: &Path, report: &Report) -> Result<()>;
    fn write_transcript(&self, run_dir: &Path, transcript: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct FsReportStore {
    pub root: PathBuf,
}

impl FsReportStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Convenience: run dir + report.json + transcript.txt in one call.
    pub fn persist(&self, report: &Report) -> Result<PathBuf> {
        let run_dir = self.create_run_dir(&report.suite, &report.run_id)?;
        self.write_report(&run_dir, report)?;
        self.write_transcript(&run_dir, &render_transcript(report))?;
        Ok(run_dir)
    }
}

impl ReportStore for FsReportStore {
    fn create_run_dir(&self, suite: &str, run_id: &RunId) -> Result<PathBuf> {
        let dir = self.root.join(suite).join(run_id.as_str());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create run dir {}", dir.display()))?;
        Ok(dir)
    }

    fn write_report(&self, run_dir: &Path, report: &Report) -> Result<()> {
        let path = run_dir.join("report.json");
        let bytes = serde_json::to_vec_pretty(report)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("write report {}", path.display()))?;
        Ok(())
    }

    fn write_transcript(&self, run_dir: &Path, transcript: &str) -> Result<()> {
        let path = run_dir.join("transcript.txt");
        std::fs::write(&path, transcript)
            .with_context(|| format!("write transcript {}", path.display()))?;
        Ok(())
    }
}
