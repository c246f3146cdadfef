use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use verifix_core::RunId;
use verifix_eval::{evaluate, ArtifactRecord, Report, ResultLog, RunArtifacts, RunMeta};
use verifix_report::FsReportStore;
use verifix_source::{content_digest, ArtifactSource, FsSource};
use verifix_suite::{compile_suite, load_suite, Suite};

use crate::{doctor::doctor, util::now_unix, Config};

pub struct Runner {
    pub project_root: PathBuf,
    pub cfg: Config,
    pub reports: FsReportStore,
}

pub struct RunOutcome {
    pub report: Report,
    /// Where the report was persisted, when it was.
    pub run_dir: Option<PathBuf>,
}

impl Runner {
    pub fn open(project_root: PathBuf) -> Result<Self> {
        let cfg_path = Config::config_path(&project_root);
        let cfg = if cfg_path.exists() {
            Config::load_from(&cfg_path)?
        } else {
            let project_id = project_root
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("project");
            let cfg = Config::default_for_project(project_id);
            cfg.save_to(&cfg_path)?;
            cfg
        };
        let reports = FsReportStore::new(cfg.report_root(&project_root));
        Ok(Self { project_root, cfg, reports })
    }

    pub fn init_project(project_root: &Path) -> Result<()> {
        std::fs::create_dir_all(project_root.join(".verifix")).ok();
        let cfg_path = Config::config_path(project_root);
        if !cfg_path.exists() {
            let project_id = project_root
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("project");
            Config::default_for_project(project_id).save_to(&cfg_path)?;
        }
        Ok(())
    }

    pub fn doctor(&self) -> Result<()> {
        doctor(&self.project_root, &self.cfg)
    }

    /// Load and compile the given suite, or the configured default.
    pub fn resolve_suite(&self, suite_path: Option<&Path>) -> Result<(PathBuf, Suite)> {
        let path = match suite_path {
            Some(p) => p.to_path_buf(),
            None => self.cfg.default_suite_path(&self.project_root),
        };
        let spec = load_suite(&path)?;
        let suite = compile_suite(&spec)?;
        info!(
            "suite {} compiled: {} checks, {} artifacts",
            suite.name,
            suite.criteria.len(),
            suite.artifacts.len()
        );
        Ok((path, suite))
    }

    /// One full verification pass: load artifacts once, judge every
    /// criterion in declaration order, aggregate, optionally persist.
    pub fn run_suite(&self, suite_path: Option<&Path>, persist: bool) -> Result<RunOutcome> {
        let (_, suite) = self.resolve_suite(suite_path)?;
        let source = FsSource::new(self.cfg.source_root(&self.project_root));
        let report = execute_suite(&suite, &source);

        let run_dir = if persist {
            let dir = self.reports.persist(&report)?;
            debug!("report stored in {}", dir.display());
            Some(dir)
        } else {
            None
        };
        info!(
            "run {} finished: {} passed, {} failed, {} warned",
            report.run_id, report.summary.passed, report.summary.failed, report.summary.warned
        );
        Ok(RunOutcome { report, run_dir })
    }
}

/// Run a compiled suite against a source. Never errors: load problems become
/// failed checks, and the report always covers every check.
pub fn execute_suite(suite: &Suite, source: &dyn ArtifactSource) -> Report {
    let run_id = RunId::new();
    let started = now_unix();

    let mut artifacts = RunArtifacts::new();
    let mut records = Vec::with_capacity(suite.artifacts.len());
    for binding in &suite.artifacts {
        match source.load(&binding.id, &binding.path) {
            Ok(artifact) => {
                debug!("artifact {} loaded ({} bytes)", binding.id, artifact.text.len());
                records.push(ArtifactRecord {
                    id: binding.id.clone(),
                    path: binding.path.display().to_string(),
                    digest: Some(content_digest(&artifact.text)),
                    error: None,
                });
                artifacts.insert_text(binding.id.clone(), artifact.text);
            }
            Err(err) => {
                warn!("artifact {} failed to load: {err}", binding.id);
                records.push(ArtifactRecord {
                    id: binding.id.clone(),
                    path: binding.path.display().to_string(),
                    digest: None,
                    error: Some(err.to_string()),
                });
                artifacts.insert_error(binding.id.clone(), err.to_string());
            }
        }
    }

    let mut log = ResultLog::new();
    for criterion in &suite.criteria {
        let result = evaluate(criterion, &artifacts, now_unix());
        debug!("[{}] {}", result.status, result.name);
        log.record(result);
    }

    let meta = RunMeta {
        run_id,
        suite: suite.name.clone(),
        suite_hash: suite.hash.clone(),
        generated_at_unix: started,
        artifacts: records,
        critical_keywords: suite.critical_keywords.clone(),
    };
    log.finalize(&meta)
}
