use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CriterionError, PatternError};
use crate::ids::ArtifactId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Warn => write!(f, "WARN"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Enforcement {
    Blocking,
    Advisory,
}

/// A unit of text under inspection. Loaded once per run and never mutated by
/// downstream components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub id: ArtifactId,
    pub text: String,
}

impl Artifact {
    pub fn new(id: ArtifactId, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }
}

/// Text to find in an artifact: a literal substring, or a bounded structure
/// whose span is closed by delimiter-balance scanning rather than by the
/// first closing marker.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Pattern {
    Literal(String),
    Bounded(BoundedPattern),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundedPattern {
    /// Literal marker locating the structure, e.g. `const jobSelectors = [`.
    pub start: String,
    pub open: char,
    pub close: char,
}

impl BoundedPattern {
    /// Net delimiter depth contributed by the start marker itself.
    pub fn start_depth(&self) -> i32 {
        let mut depth = 0;
        for ch in self.start.chars() {
            if ch == self.open {
                depth += 1;
            } else if ch == self.close {
                depth -= 1;
            }
        }
        depth
    }
}

impl Pattern {
    pub fn literal(s: impl Into<String>) -> Self {
        Pattern::Literal(s.into())
    }

    pub fn bounded(start: impl Into<String>, open: char, close: char) -> Self {
        Pattern::Bounded(BoundedPattern { start: start.into(), open, close })
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        match self {
            Pattern::Literal(lit) => {
                if lit.is_empty() {
                    return Err(PatternError::EmptyLiteral);
                }
                Ok(())
            }
            Pattern::Bounded(b) => {
                if b.start.is_empty() {
                    return Err(PatternError::EmptyStart);
                }
                if b.open == b.close {
                    return Err(PatternError::SameDelimiters(b.open));
                }
                if b.start_depth() < 0 {
                    return Err(PatternError::UnbalancedStart(b.start.clone()));
                }
                Ok(())
            }
        }
    }
}

/// A named pattern used for ordering checks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Anchor {
    pub name: String,
    pub pattern: Pattern,
}

impl Anchor {
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        Self { name: name.into(), pattern }
    }
}

/// Satisfaction predicate over match/order outcomes. Pure data; evaluation
/// lives in verifix-eval.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Predicate {
    /// Leaf: the pattern occurs in the artifact.
    Pattern(Pattern),
    AllOf(Vec<Predicate>),
    AtLeast { min: usize, of: Vec<Predicate> },
    Ordered { anchors: Vec<Anchor>, expected: Vec<String> },
}

impl From<Pattern> for Predicate {
    fn from(p: Pattern) -> Self {
        Predicate::Pattern(p)
    }
}

impl Predicate {
    pub fn validate(&self) -> Result<(), CriterionError> {
        match self {
            Predicate::Pattern(p) => Ok(p.validate()?),
            Predicate::AllOf(of) => {
                if of.is_empty() {
                    return Err(CriterionError::EmptyGroup);
                }
                for sub in of {
                    sub.validate()?;
                }
                Ok(())
            }
            Predicate::AtLeast { min, of } => {
                if of.is_empty() {
                    return Err(CriterionError::EmptyGroup);
                }
                if *min == 0 || *min > of.len() {
                    return Err(CriterionError::MinOutOfRange { min: *min, len: of.len() });
                }
                for sub in of {
                    sub.validate()?;
                }
                Ok(())
            }
            Predicate::Ordered { anchors, expected } => {
                if anchors.is_empty() {
                    return Err(CriterionError::EmptyGroup);
                }
                let mut seen = HashSet::new();
                for a in anchors {
                    a.pattern.validate()?;
                    if !seen.insert(a.name.as_str()) {
                        return Err(CriterionError::DuplicateAnchor(a.name.clone()));
                    }
                }
                if expected.len() != anchors.len() {
                    return Err(CriterionError::ExpectedNotPermutation);
                }
                let mut listed = HashSet::new();
                for name in expected {
                    if !seen.contains(name.as_str()) {
                        return Err(CriterionError::UnknownAnchor(name.clone()));
                    }
                    if !listed.insert(name.as_str()) {
                        return Err(CriterionError::ExpectedNotPermutation);
                    }
                }
                Ok(())
            }
        }
    }
}

/// A named, composable pass/fail/warn rule bound to one artifact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Criterion {
    pub name: String,
    pub artifact: ArtifactId,
    pub enforcement: Enforcement,
    pub predicate: Predicate,
}

impl Criterion {
    pub fn validate(&self) -> Result<(), CriterionError> {
        if self.name.trim().is_empty() {
            return Err(CriterionError::EmptyName);
        }
        self.predicate.validate()
    }

    pub fn is_blocking(&self) -> bool {
        self.enforcement == Enforcement::Blocking
    }
}
