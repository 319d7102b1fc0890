use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("Empty version string (from {0:?})")]
    Empty(String),

    #[error("Malformed version {version:?} (from {raw:?})")]
    Malformed { raw: String, version: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementError {
    #[error("Unsupported requirement descriptor: {0}")]
    UnsupportedShape(String),

    #[error("Requirement for {key:?} is not a string: {value}")]
    NonStringConstraint { key: String, value: String },
}
