//! Caller-facing error taxonomy for query value objects.
//!
//! Both variants are argument-validation failures raised synchronously
//! to the caller and never retried. Missing rows are not errors
//! anywhere in repokit; lookups return `Option`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Filters were not a mapping of field names to scalar values.
    #[error("invalid filters: {0}")]
    InvalidFilters(String),

    /// Page number or page size outside the valid range (both must be >= 1).
    #[error("invalid page params: {0}")]
    InvalidPageParams(String),
}
