//! Error types for criteria construction

use thiserror::Error;

/// Result type alias for criteria operations
pub type CriteriaResult<T> = Result<T, CriteriaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriteriaError {
    #[error("NOT takes exactly one operand, got {count}")]
    NotArity { count: usize },
}
