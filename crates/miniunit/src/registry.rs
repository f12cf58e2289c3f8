//! Test case registry
//!
//! The process-wide registry is created on first use and seeded with every
//! case declared through the macros. It is append-only: cases are never
//! removed or reordered.

use crate::case::TestCase;
use crate::declare::declared_cases;
use crate::error::{SuiteError, SuiteResult};
use once_cell::sync::Lazy;
use std::cell::Cell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Global test case registry
static GLOBAL: Lazy<Registry> = Lazy::new(|| {
    let _seeding = SeedingGuard::enter();
    let registry = Registry::new();
    for case in declared_cases() {
        registry.register(Arc::new(case));
    }
    registry
});

thread_local! {
    /// Set while declared cases are being instantiated on this thread
    static SEEDING: Cell<bool> = Cell::new(false);
}

struct SeedingGuard;

impl SeedingGuard {
    fn enter() -> Self {
        SEEDING.with(|s| s.set(true));
        SeedingGuard
    }
}

impl Drop for SeedingGuard {
    fn drop(&mut self) {
        SEEDING.with(|s| s.set(false));
    }
}

/// Ordered collection of test cases
#[derive(Debug, Default)]
pub struct Registry {
    cases: Mutex<Vec<Arc<TestCase>>>,
}

impl Registry {
    /// Create an empty registry, independent of the global one
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    ///
    /// # Panics
    ///
    /// When called from a `register_case!` constructor: the registry is
    /// still being created at that point.
    pub fn global() -> &'static Registry {
        if SEEDING.with(Cell::get) {
            panic!("test case constructors must not access the test registry");
        }
        &GLOBAL
    }

    /// Append a case. Duplicate names are kept.
    pub fn register(&self, case: Arc<TestCase>) {
        debug!(name = %case.name(), "registered test case");
        self.lock().push(case);
    }

    /// Snapshot of all cases in registration order
    pub fn all(&self) -> Vec<Arc<TestCase>> {
        self.lock().clone()
    }

    /// All cases with the given name, in registration order
    pub fn find(&self, name: &str) -> Vec<Arc<TestCase>> {
        self.lock()
            .iter()
            .filter(|case| case.name() == name)
            .cloned()
            .collect()
    }

    /// Mark every case named `name` as skipped; returns how many were marked.
    pub fn skip(&self, name: &str, reason: &str) -> SuiteResult<usize> {
        let matches = self.find(name);
        if matches.is_empty() {
            return Err(SuiteError::unknown_case(name));
        }
        for case in &matches {
            case.mark_skip(reason)?;
        }
        Ok(matches.len())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<TestCase>>> {
        self.cases.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Append a case to the global registry
pub fn register(case: Arc<TestCase>) {
    Registry::global().register(case);
}

/// Snapshot of the global registry
pub fn all() -> Vec<Arc<TestCase>> {
    Registry::global().all()
}

/// Skip every globally registered case named `name`
pub fn skip(name: &str, reason: &str) -> SuiteResult<usize> {
    Registry::global().skip(name, reason)
}
