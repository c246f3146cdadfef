use verifix_core::{CheckResult, RunId};

use crate::report::{ArtifactRecord, Report, Summary};

/// Everything a report needs besides the results themselves.
#[derive(Clone, Debug)]
pub struct RunMeta {
    pub run_id: RunId,
    pub suite: String,
    pub suite_hash: String,
    pub generated_at_unix: i64,
    pub artifacts: Vec<ArtifactRecord>,
    pub critical_keywords: Vec<String>,
}

/// Append-only record of check results for one run. Finalizing is a pure
/// read, so it can happen any number of times with the same answer.
#[derive(Clone, Debug, Default)]
pub struct ResultLog {
    results: Vec<CheckResult>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn finalize(&self, meta: &RunMeta) -> Report {
        let summary = Summary::from_results(&self.results);
        let critical = self
            .results
            .iter()
            .filter(|r| r.is_fail() && r.matches_keywords(&meta.critical_keywords))
            .cloned()
            .collect();
        Report {
            run_id: meta.run_id.clone(),
            suite: meta.suite.clone(),
            suite_hash: meta.suite_hash.clone(),
            generated_at_unix: meta.generated_at_unix,
            artifacts: meta.artifacts.clone(),
            results: self.results.clone(),
            summary,
            critical,
        }
    }
}
