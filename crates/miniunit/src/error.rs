//! Suite error types

use thiserror::Error;

pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors raised while declaring, skipping or reporting test cases.
///
/// A failing test body is never an error; it is reported as an
/// [`Outcome`](crate::Outcome).
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Test case name must not be empty")]
    EmptyName,

    #[error("Skip reason for test case '{name}' must not be empty")]
    EmptySkipReason { name: String },

    #[error("No test case named '{name}' is registered")]
    UnknownCase { name: String },

    #[error("Failed to write test report: {0}")]
    Render(#[from] std::io::Error),
}

impl SuiteError {
    /// Create an unknown case error
    pub fn unknown_case(name: impl Into<String>) -> Self {
        Self::UnknownCase { name: name.into() }
    }

    /// Create an empty skip reason error
    pub fn empty_skip_reason(name: impl Into<String>) -> Self {
        Self::EmptySkipReason { name: name.into() }
    }
}
