//! Test case model
//!
//! A [`TestCase`] pairs a name and description with a body. Cases are shared
//! with the registry through `Arc` and live for the rest of the process.

use crate::error::{SuiteError, SuiteResult};
use crate::registry;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// The behavior under test.
///
/// Returns `true` for a pass and `false` for a failure. A body may also
/// panic, which the runner reports as a failure.
pub trait TestBody: Send + Sync {
    fn run(&self) -> bool;
}

impl<F> TestBody for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn run(&self) -> bool {
        self()
    }
}

/// One declared unit of testable behavior
pub struct TestCase {
    name: String,
    description: String,
    /// `Some` once the case has been marked skipped
    skip_reason: Mutex<Option<String>>,
    body: Box<dyn TestBody>,
}

impl TestCase {
    /// Create a case without registering it.
    ///
    /// Use [`TestCase::declare`] to create and register in one step.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        body: impl TestBody + 'static,
    ) -> SuiteResult<Self> {
        Self::from_boxed(name, description, Box::new(body))
    }

    pub(crate) fn from_boxed(
        name: impl Into<String>,
        description: impl Into<String>,
        body: Box<dyn TestBody>,
    ) -> SuiteResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SuiteError::EmptyName);
        }
        Ok(Self {
            name,
            description: description.into(),
            skip_reason: Mutex::new(None),
            body,
        })
    }

    /// Create a case and append it to the global registry.
    ///
    /// The returned handle can be used to skip the case later.
    pub fn declare(
        name: impl Into<String>,
        description: impl Into<String>,
        body: impl TestBody + 'static,
    ) -> SuiteResult<Arc<Self>> {
        let case = Arc::new(Self::new(name, description, body)?);
        registry::register(Arc::clone(&case));
        Ok(case)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Mark this case as skipped so the runner never invokes its body.
    ///
    /// Marking a case that a run has already processed only affects later
    /// runs. Marking twice replaces the reason.
    pub fn mark_skip(&self, reason: impl Into<String>) -> SuiteResult<()> {
        let reason = reason.into();
        if reason.is_empty() {
            return Err(SuiteError::empty_skip_reason(&self.name));
        }
        debug!(name = %self.name, %reason, "marked test case as skipped");
        *self.lock_skip() = Some(reason);
        Ok(())
    }

    pub fn is_skipped(&self) -> bool {
        self.lock_skip().is_some()
    }

    pub fn skip_reason(&self) -> Option<String> {
        self.lock_skip().clone()
    }

    /// Run the body once. Panics propagate to the caller.
    pub(crate) fn run_body(&self) -> bool {
        self.body.run()
    }

    fn lock_skip(&self) -> MutexGuard<'_, Option<String>> {
        self.skip_reason
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("skip_reason", &self.skip_reason())
            .finish_non_exhaustive()
    }
}
