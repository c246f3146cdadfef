use std::collections::BTreeMap;

use verifix_core::{
    match_pattern, validate_order, ArtifactId, CheckResult, CheckStatus, Criterion, Pattern,
    Predicate,
};

/// Artifact text for one run, loaded up front. Loads that failed keep their
/// reason so every check bound to them can fail with it.
#[derive(Clone, Debug, Default)]
pub struct RunArtifacts {
    loaded: BTreeMap<ArtifactId, String>,
    failed: BTreeMap<ArtifactId, String>,
}

impl RunArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, id: ArtifactId, text: String) {
        self.loaded.insert(id, text);
    }

    pub fn insert_error(&mut self, id: ArtifactId, reason: String) {
        self.failed.insert(id, reason);
    }

    pub fn text(&self, id: &ArtifactId) -> Result<&str, String> {
        if let Some(text) = self.loaded.get(id) {
            return Ok(text);
        }
        match self.failed.get(id) {
            Some(reason) => Err(reason.clone()),
            None => Err(format!("artifact not loaded: {}", id.as_str())),
        }
    }
}

struct Eval {
    satisfied: bool,
    /// A tie in an ordered group makes the verdict indeterminate; a satisfied
    /// but undecided check warns instead of passing.
    undecided: bool,
    notes: Vec<String>,
}

/// Judge one criterion against loaded artifact text. Never panics and never
/// returns an error: anything that prevents judgment becomes a failed check
/// with the reason in `details`.
pub fn evaluate(criterion: &Criterion, artifacts: &RunArtifacts, now_unix: i64) -> CheckResult {
    let text = match artifacts.text(&criterion.artifact) {
        Ok(text) => text,
        // An unreadable artifact fails the check even when advisory; there is
        // nothing to be lenient about.
        Err(reason) => {
            return CheckResult {
                name: criterion.name.clone(),
                artifact: criterion.artifact.clone(),
                status: CheckStatus::Fail,
                enforcement: criterion.enforcement.clone(),
                details: reason,
                recorded_at_unix: now_unix,
            }
        }
    };

    let eval = eval_predicate(text, &criterion.predicate);
    let status = if eval.satisfied {
        if eval.undecided {
            CheckStatus::Warn
        } else {
            CheckStatus::Pass
        }
    } else if criterion.is_blocking() {
        CheckStatus::Fail
    } else {
        CheckStatus::Warn
    };

    CheckResult {
        name: criterion.name.clone(),
        artifact: criterion.artifact.clone(),
        status,
        enforcement: criterion.enforcement.clone(),
        details: eval.notes.join("; "),
        recorded_at_unix: now_unix,
    }
}

fn eval_predicate(text: &str, predicate: &Predicate) -> Eval {
    match predicate {
        Predicate::Pattern(pattern) => {
            let outcome = match_pattern(text, pattern);
            let notes = if outcome.found {
                vec![]
            } else {
                vec![format!("pattern not found: {}", preview(pattern))]
            };
            Eval { satisfied: outcome.found, undecided: false, notes }
        }
        Predicate::AllOf(of) => {
            let evals: Vec<Eval> = of.iter().map(|p| eval_predicate(text, p)).collect();
            let satisfied = evals.iter().all(|e| e.satisfied);
            let undecided = evals.iter().any(|e| e.undecided);
            let notes = evals.into_iter().flat_map(|e| e.notes).collect();
            Eval { satisfied, undecided, notes }
        }
        Predicate::AtLeast { min, of } => {
            let evals: Vec<Eval> = of.iter().map(|p| eval_predicate(text, p)).collect();
            let hits = evals.iter().filter(|e| e.satisfied).count();
            let satisfied = hits >= *min;
            // Only satisfied members decide the verdict, so only their ties
            // can make it indeterminate.
            let undecided = evals.iter().any(|e| e.satisfied && e.undecided);
            let mut notes = Vec::new();
            if !satisfied {
                notes.push(format!("only {hits} of {} satisfied (need {min})", of.len()));
                notes.extend(evals.into_iter().flat_map(|e| e.notes));
            }
            Eval { satisfied, undecided, notes }
        }
        Predicate::Ordered { anchors, expected } => {
            let outcome = validate_order(text, anchors, expected);
            let mut notes = Vec::new();
            if !outcome.missing.is_empty() {
                notes.push(format!("missing anchors: {}", outcome.missing.join(", ")));
            }
            if !outcome.in_order {
                notes.push(format!(
                    "expected {}, actual {}",
                    outcome.expected.join(" -> "),
                    outcome.actual.join(" -> ")
                ));
            }
            for (a, b) in &outcome.ties {
                notes.push(format!("anchors {a} and {b} share a first offset"));
            }
            Eval {
                satisfied: outcome.in_order && outcome.missing.is_empty(),
                undecided: outcome.is_indeterminate(),
                notes,
            }
        }
    }
}

/// Short printable form of a pattern for details lines.
fn preview(pattern: &Pattern) -> String {
    match pattern {
        Pattern::Literal(lit) => format!("{:?}", truncate(lit)),
        Pattern::Bounded(b) => format!("{:?} {}..{}", truncate(&b.start), b.open, b.close),
    }
}

fn truncate(s: &str) -> String {
    const MAX: usize = 48;
    if s.chars().count() <= MAX {
        return s.to_string();
    }
    let head: String = s.chars().take(MAX).collect();
    format!("{head}..")
}
