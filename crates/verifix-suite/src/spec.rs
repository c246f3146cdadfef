use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SuiteError;

/// On-disk suite document, as written by hand in YAML. Compilation into core
/// criteria lives in `compile`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteSpec {
    pub suite: String,
    #[serde(default)]
    pub critical_keywords: Vec<String>,
    pub artifacts: Vec<ArtifactSpec>,
    pub checks: Vec<CheckSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub id: String,
    pub path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckSpec {
    pub name: String,
    pub artifact: String,
    /// Advisory checks warn instead of failing when unsatisfied.
    #[serde(default)]
    pub advisory: bool,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub require: RequireSpec,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequireSpec {
    Contains(String),
    Bounded(BoundedSpec),
    AllOf(Vec<RequireSpec>),
    AtLeast(AtLeastSpec),
    Ordered(OrderedSpec),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoundedSpec {
    pub start: String,
    pub open: char,
    pub close: char,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtLeastSpec {
    pub min: usize,
    pub of: Vec<RequireSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderedSpec {
    pub anchors: Vec<AnchorSpec>,
    /// Anchor names in required order. Empty means declaration order.
    #[serde(default)]
    pub expected: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnchorSpec {
    pub name: String,
    pub require: RequireSpec,
}

pub fn load_suite(path: &Path) -> Result<SuiteSpec, SuiteError> {
    let text = std::fs::read_to_string(path).map_err(|source| SuiteError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let spec: SuiteSpec = serde_yaml::from_str(&text).map_err(|source| SuiteError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    validate_suite_spec(&spec)?;
    Ok(spec)
}

/// Structural checks that do not depend on pattern semantics. Pattern and
/// group validation happens during compilation.
pub fn validate_suite_spec(spec: &SuiteSpec) -> Result<(), SuiteError> {
    if spec.suite.trim().is_empty() {
        return Err(SuiteError::EmptyName);
    }
    if spec.artifacts.is_empty() {
        return Err(SuiteError::NoArtifacts);
    }
    if spec.checks.is_empty() {
        return Err(SuiteError::NoChecks);
    }
    let mut artifact_ids = HashSet::new();
    for artifact in &spec.artifacts {
        if !artifact_ids.insert(artifact.id.as_str()) {
            return Err(SuiteError::DuplicateArtifact(artifact.id.clone()));
        }
        if artifact.path.trim().is_empty() {
            return Err(SuiteError::EmptyArtifactPath(artifact.id.clone()));
        }
    }
    let mut check_names = HashSet::new();
    for check in &spec.checks {
        if !check_names.insert(check.name.as_str()) {
            return Err(SuiteError::DuplicateCheck(check.name.clone()));
        }
        if !artifact_ids.contains(check.artifact.as_str()) {
            return Err(SuiteError::UnknownArtifact {
                check: check.name.clone(),
                artifact: check.artifact.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITE_YAML: &str = r#"
suite: critical-fixes
critical_keywords: [database, ipc]
artifacts:
  - id: ai-handlers
    path: electron/ai-handlers.ts
checks:
  - name: auditor channel registered
    artifact: ai-handlers
    require:
      contains: "auditor:get-pending-questions"
  - name: channels grouped
    artifact: ai-handlers
    advisory: true
    require:
      at_least:
        min: 1
        of:
          - contains: "auditor:save-criteria"
          - bounded:
              start: "const channels = ["
              open: "["
              close: "]"
"#;

    #[test]
    fn parses_the_documented_shape() {
        let spec: SuiteSpec = serde_yaml::from_str(SUITE_YAML).unwrap();
        assert_eq!(spec.suite, "critical-fixes");
        assert_eq!(spec.critical_keywords, vec!["database", "ipc"]);
        assert_eq!(spec.artifacts.len(), 1);
        assert_eq!(spec.checks.len(), 2);
        assert!(!spec.checks[0].advisory);
        assert!(spec.checks[1].advisory);
        match &spec.checks[1].require {
            RequireSpec::AtLeast(at_least) => {
                assert_eq!(at_least.min, 1);
                assert_eq!(at_least.of.len(), 2);
                assert!(matches!(at_least.of[1], RequireSpec::Bounded(_)));
            }
            other => panic!("unexpected require: {other:?}"),
        }
        validate_suite_spec(&spec).unwrap();
    }

    #[test]
    fn rejects_checks_against_undeclared_artifacts() {
        let mut spec: SuiteSpec = serde_yaml::from_str(SUITE_YAML).unwrap();
        spec.checks[0].artifact = "nope".into();
        let err = validate_suite_spec(&spec).unwrap_err();
        assert!(matches!(err, SuiteError::UnknownArtifact { .. }));
    }

    #[test]
    fn rejects_duplicate_check_names() {
        let mut spec: SuiteSpec = serde_yaml::from_str(SUITE_YAML).unwrap();
        let clone = spec.checks[0].clone();
        spec.checks.push(clone);
        assert!(matches!(
            validate_suite_spec(&spec),
            Err(SuiteError::DuplicateCheck(_))
        ));
    }

    #[test]
    fn load_reports_missing_file_as_io() {
        let err = load_suite(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, SuiteError::Io { .. }));
    }
}
