use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("literal pattern cannot be empty")]
    EmptyLiteral,
    #[error("bounded pattern start marker cannot be empty")]
    EmptyStart,
    #[error("bounded pattern open and close delimiters are both {0:?}")]
    SameDelimiters(char),
    #[error("bounded pattern start marker closes more than it opens: {0}")]
    UnbalancedStart(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CriterionError {
    #[error("criterion name cannot be empty")]
    EmptyName,
    #[error("predicate group cannot be empty")]
    EmptyGroup,
    #[error("at_least min {min} out of range for group of {len}")]
    MinOutOfRange { min: usize, len: usize },
    #[error("duplicate anchor name: {0}")]
    DuplicateAnchor(String),
    #[error("expected order references unknown anchor: {0}")]
    UnknownAnchor(String),
    #[error("expected order must list every anchor exactly once")]
    ExpectedNotPermutation,
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
