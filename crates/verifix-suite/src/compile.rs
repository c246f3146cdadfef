use std::path::PathBuf;

use sha2::{Digest, Sha256};
use verifix_core::{Anchor, ArtifactId, BoundedPattern, Criterion, Enforcement, Pattern, Predicate};

use crate::error::SuiteError;
use crate::spec::{validate_suite_spec, AnchorSpec, RequireSpec, SuiteSpec};

/// A suite ready to evaluate: core criteria plus the artifact bindings and
/// keywords the run layer needs.
#[derive(Clone, Debug)]
pub struct Suite {
    pub name: String,
    pub hash: String,
    pub critical_keywords: Vec<String>,
    pub artifacts: Vec<ArtifactBinding>,
    pub criteria: Vec<Criterion>,
}

#[derive(Clone, Debug)]
pub struct ArtifactBinding {
    pub id: ArtifactId,
    pub path: PathBuf,
}

impl Suite {
    pub fn binding(&self, id: &ArtifactId) -> Option<&ArtifactBinding> {
        self.artifacts.iter().find(|b| &b.id == id)
    }
}

/// Turn a parsed suite into core criteria, rejecting anything malformed
/// before a single artifact is read.
pub fn compile_suite(spec: &SuiteSpec) -> Result<Suite, SuiteError> {
    validate_suite_spec(spec)?;

    let artifacts = spec
        .artifacts
        .iter()
        .map(|a| ArtifactBinding {
            id: ArtifactId::from_str(a.id.clone()),
            path: PathBuf::from(&a.path),
        })
        .collect();

    let mut criteria = Vec::with_capacity(spec.checks.len());
    for check in &spec.checks {
        let enforcement = if check.advisory {
            Enforcement::Advisory
        } else {
            Enforcement::Blocking
        };
        let criterion = Criterion {
            name: check.name.clone(),
            artifact: ArtifactId::from_str(check.artifact.clone()),
            enforcement,
            predicate: compile_require(&check.require)?,
        };
        criterion.validate().map_err(|source| SuiteError::Invalid {
            check: check.name.clone(),
            source,
        })?;
        criteria.push(criterion);
    }

    Ok(Suite {
        name: spec.suite.clone(),
        hash: suite_hash(spec),
        critical_keywords: spec.critical_keywords.clone(),
        artifacts,
        criteria,
    })
}

fn compile_require(require: &RequireSpec) -> Result<Predicate, SuiteError> {
    Ok(match require {
        RequireSpec::Contains(lit) => Predicate::Pattern(Pattern::Literal(lit.clone())),
        RequireSpec::Bounded(b) => Predicate::Pattern(Pattern::Bounded(BoundedPattern {
            start: b.start.clone(),
            open: b.open,
            close: b.close,
        })),
        RequireSpec::AllOf(of) => {
            let subs = of.iter().map(compile_require).collect::<Result<_, _>>()?;
            Predicate::AllOf(subs)
        }
        RequireSpec::AtLeast(at_least) => {
            let of = at_least
                .of
                .iter()
                .map(compile_require)
                .collect::<Result<_, _>>()?;
            Predicate::AtLeast { min: at_least.min, of }
        }
        RequireSpec::Ordered(ordered) => {
            let anchors = ordered
                .anchors
                .iter()
                .map(compile_anchor)
                .collect::<Result<Vec<_>, _>>()?;
            let expected = if ordered.expected.is_empty() {
                anchors.iter().map(|a| a.name.clone()).collect()
            } else {
                ordered.expected.clone()
            };
            Predicate::Ordered { anchors, expected }
        }
    })
}

fn compile_anchor(anchor: &AnchorSpec) -> Result<Anchor, SuiteError> {
    let pattern = match &anchor.require {
        RequireSpec::Contains(lit) => Pattern::Literal(lit.clone()),
        RequireSpec::Bounded(b) => Pattern::Bounded(BoundedPattern {
            start: b.start.clone(),
            open: b.open,
            close: b.close,
        }),
        _ => return Err(SuiteError::AnchorNotPattern(anchor.name.clone())),
    };
    Ok(Anchor::new(anchor.name.clone(), pattern))
}

/// Sha256 over the suite's canonical JSON form. Key order in the YAML file
/// never changes the hash.
pub fn suite_hash(spec: &SuiteSpec) -> String {
    let canon = sort_json(serde_json::to_value(spec).expect("SuiteSpec serializable"));
    let bytes = serde_json::to_vec(&canon).expect("json bytes");
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn sort_json(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let sorted: std::collections::BTreeMap<String, serde_json::Value> =
                map.into_iter().map(|(k, v)| (k, sort_json(v))).collect();
            serde_json::Value::Object(sorted.into_iter().collect())
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(sort_json).collect())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ArtifactSpec, CheckSpec, OrderedSpec};

    fn minimal_spec(require: RequireSpec) -> SuiteSpec {
        SuiteSpec {
            suite: "s".into(),
            critical_keywords: vec![],
            artifacts: vec![ArtifactSpec { id: "a".into(), path: "a.ts".into() }],
            checks: vec![CheckSpec {
                name: "c".into(),
                artifact: "a".into(),
                advisory: false,
                require,
            }],
        }
    }

    #[test]
    fn compiles_contains_to_a_literal_criterion() {
        let suite = compile_suite(&minimal_spec(RequireSpec::Contains("x".into()))).unwrap();
        assert_eq!(suite.criteria.len(), 1);
        assert_eq!(
            suite.criteria[0].predicate,
            Predicate::Pattern(Pattern::literal("x"))
        );
        assert!(suite.criteria[0].is_blocking());
        assert_eq!(suite.hash.len(), 64);
    }

    #[test]
    fn ordered_defaults_expected_to_declaration_order() {
        let require = RequireSpec::Ordered(OrderedSpec {
            anchors: vec![
                AnchorSpec { name: "a".into(), require: RequireSpec::Contains("1".into()) },
                AnchorSpec { name: "b".into(), require: RequireSpec::Contains("2".into()) },
            ],
            expected: vec![],
        });
        let suite = compile_suite(&minimal_spec(require)).unwrap();
        match &suite.criteria[0].predicate {
            Predicate::Ordered { expected, .. } => {
                assert_eq!(expected, &vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("unexpected predicate: {other:?}"),
        }
    }

    #[test]
    fn anchor_groups_are_rejected() {
        let require = RequireSpec::Ordered(OrderedSpec {
            anchors: vec![AnchorSpec {
                name: "grp".into(),
                require: RequireSpec::AllOf(vec![RequireSpec::Contains("x".into())]),
            }],
            expected: vec![],
        });
        let err = compile_suite(&minimal_spec(require)).unwrap_err();
        assert!(matches!(err, SuiteError::AnchorNotPattern(_)));
    }

    #[test]
    fn invalid_patterns_fail_compilation_with_check_name() {
        let err = compile_suite(&minimal_spec(RequireSpec::Contains(String::new()))).unwrap_err();
        match err {
            SuiteError::Invalid { check, .. } => assert_eq!(check, "c"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn hash_ignores_yaml_key_order() {
        let a: SuiteSpec = serde_yaml::from_str(
            "suite: s\nartifacts:\n  - id: a\n    path: a.ts\nchecks:\n  - name: c\n    artifact: a\n    require:\n      contains: x\n",
        )
        .unwrap();
        let b: SuiteSpec = serde_yaml::from_str(
            "checks:\n  - require:\n      contains: x\n    artifact: a\n    name: c\nartifacts:\n  - path: a.ts\n    id: a\nsuite: s\n",
        )
        .unwrap();
        assert_eq!(suite_hash(&a), suite_hash(&b));
        let c: SuiteSpec = serde_yaml::from_str(
            "suite: s\nartifacts:\n  - id: a\n    path: a.ts\nchecks:\n  - name: c\n    artifact: a\n    require:\n      contains: y\n",
        )
        .unwrap();
        assert_ne!(suite_hash(&a), suite_hash(&c));
    }
}
