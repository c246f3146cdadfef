use serde::{Deserialize, Serialize};
use verifix_core::{ArtifactId, CheckResult, CheckStatus, RunId};

/// How one artifact load went, recorded so a report pins the exact content
/// it judged (or the reason it could not).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArtifactRecord {
    pub id: ArtifactId,
    pub path: String,
    pub digest: Option<String>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warned: usize,
    /// passed / (passed + failed); warnings stay out of the denominator.
    pub success_rate: f64,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let passed = results.iter().filter(|r| r.status == CheckStatus::Pass).count();
        let failed = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
        let warned = results.iter().filter(|r| r.status == CheckStatus::Warn).count();
        let decided = passed + failed;
        let success_rate = if decided == 0 {
            1.0
        } else {
            passed as f64 / decided as f64
        };
        Summary { total: results.len(), passed, failed, warned, success_rate }
    }
}

/// Complete outcome of one run. Everything downstream (transcript, JSON,
/// exit code) derives from this value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub run_id: RunId,
    pub suite: String,
    pub suite_hash: String,
    pub generated_at_unix: i64,
    pub artifacts: Vec<ArtifactRecord>,
    pub results: Vec<CheckResult>,
    pub summary: Summary,
    /// Failed checks whose name or details hit a critical keyword.
    pub critical: Vec<CheckResult>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.summary.failed == 0
    }

    /// The superseding entry for a check name: results are append-only, so
    /// the last one recorded wins. Counts still run over every entry.
    pub fn latest(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().rev().find(|r| r.name == name)
    }
}
