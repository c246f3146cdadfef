use thiserror::Error;
use verifix_core::CriterionError;

/// Anything wrong with a suite file is a configuration error, reported
/// before any check runs. Check failures never travel through this type.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("read suite {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse suite {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("suite name cannot be empty")]
    EmptyName,
    #[error("suite declares no artifacts")]
    NoArtifacts,
    #[error("suite declares no checks")]
    NoChecks,
    #[error("duplicate artifact id: {0}")]
    DuplicateArtifact(String),
    #[error("artifact {0} has an empty path")]
    EmptyArtifactPath(String),
    #[error("duplicate check name: {0}")]
    DuplicateCheck(String),
    #[error("check {check} references undeclared artifact: {artifact}")]
    UnknownArtifact { check: String, artifact: String },
    #[error("anchor {0} must be a plain pattern, not a group")]
    AnchorNotPattern(String),
    #[error("check {check}: {source}")]
    Invalid {
        check: String,
        #[source]
        source: CriterionError,
    },
}
