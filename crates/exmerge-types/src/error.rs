use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown attribute name: {0}")]
    UnknownAttribute(String),

    #[error("empty source identifier")]
    EmptySource,
}
