use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use verifix_eval::Report;
use verifix_source::FsSource;
use verifix_suite::{compile_suite, load_suite};

use crate::runner::execute_suite;

#[derive(Debug, Deserialize)]
pub struct ScenarioExpected {
    pub scenario_id: String,
    pub expect: ExpectedCounts,
}

#[derive(Debug, Deserialize)]
pub struct ExpectedCounts {
    pub passed: usize,
    pub failed: usize,
    pub warned: usize,
    #[serde(default)]
    pub critical: Vec<String>,
    pub exit_ok: bool,
}

#[derive(Debug)]
pub struct ScenarioResult {
    pub report: Report,
    /// What the process exit would be: true iff zero failed checks.
    pub exit_ok: bool,
}

pub fn load_expected(dir: &Path) -> Result<ScenarioExpected> {
    let p = dir.join("expected.yaml");
    let s = std::fs::read_to_string(&p)
        .with_context(|| format!("read expected.yaml: {}", p.display()))?;
    let exp: ScenarioExpected =
        serde_yaml::from_str(&s).with_context(|| "parse expected.yaml")?;
    Ok(exp)
}

/// Fixture-mode run: `suite.yaml` next to an `artifacts/` directory standing
/// in for project sources. Nothing is persisted; the report is the result.
pub fn simulate(dir: &Path) -> Result<ScenarioResult> {
    let spec = load_suite(&dir.join("suite.yaml"))?;
    let suite = compile_suite(&spec)?;
    let source = FsSource::new(dir.join("artifacts"));
    let report = execute_suite(&suite, &source);
    let exit_ok = report.is_success();
    Ok(ScenarioResult { report, exit_ok })
}
