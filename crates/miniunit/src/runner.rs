//! Test runner - execute registered cases in order

use crate::case::TestCase;
use crate::error::SuiteResult;
use crate::registry::Registry;
use crate::render::{Layout, Renderer, TableRenderer};
use std::any::Any;
use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Comment shown for a case whose body panicked
pub const PANIC_MARKER: &str = "Panicked!";

/// Why a case failed, beyond returning `false`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The body panicked instead of returning
    Panicked { message: String },
}

impl FailReason {
    /// Fixed text shown in reports
    pub fn marker(&self) -> &'static str {
        match self {
            FailReason::Panicked { .. } => PANIC_MARKER,
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Outcome of processing a single case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// `reason` is `None` when the body returned `false`
    Fail { reason: Option<FailReason> },
    Skipped { reason: String },
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }

    /// Short label: `PASS`, `FAIL` or `SKIP`
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail { .. } => "FAIL",
            Outcome::Skipped { .. } => "SKIP",
        }
    }

    /// Reason text, empty when there is none
    pub fn comment(&self) -> &str {
        match self {
            Outcome::Pass | Outcome::Fail { reason: None } => "",
            Outcome::Fail {
                reason: Some(reason),
            } => reason.marker(),
            Outcome::Skipped { reason } => reason,
        }
    }
}

/// Result of processing one case
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    pub description: String,
    pub outcome: Outcome,
    /// Time spent in the body, zero for skipped cases
    pub duration: Duration,
}

/// Results of one run, in registration order
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    /// Aggregate verdict: no executed case failed.
    ///
    /// Skipped cases count as passing, so an empty or all-skipped suite
    /// passes.
    pub fn verdict(&self) -> bool {
        !self.cases.iter().any(|c| c.outcome.is_fail())
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_fail()).count()
    }

    pub fn skipped(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_skipped()).count()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Process exit status for the verdict: 0 on pass, 1 on fail
    pub fn exit_code(&self) -> ExitCode {
        if self.verdict() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Test runner with configuration
///
/// A panicking body is reported as a failure, but the process panic hook
/// still runs first. With the default hook that prints a `panicked at`
/// message to stderr; hosts that want a clean stderr install their own hook
/// before running.
pub struct Runner {
    /// Color outcome labels in the default table
    color: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    /// Create a runner with colored output enabled
    pub fn new() -> Self {
        Self { color: true }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Run the global registry, printing the default table to stdout
    pub fn run(&self) -> SuiteResult<SuiteReport> {
        self.run_registry(Registry::global())
    }

    /// Run `registry`, printing the default table to stdout
    pub fn run_registry(&self, registry: &Registry) -> SuiteResult<SuiteReport> {
        // Unlocked handle: bodies may print, from any thread, while the run is in progress.
        let mut out = io::stdout();
        let mut renderer = TableRenderer::new(self.color);
        self.run_with(registry, &mut renderer, &mut out)
    }

    /// Run `registry` with a custom renderer and output.
    ///
    /// The case list is read once, when the run starts. Each row is written
    /// as soon as its case finishes. `out` is held across case bodies, so it
    /// must not be a locked stdout handle.
    pub fn run_with(
        &self,
        registry: &Registry,
        renderer: &mut dyn Renderer,
        out: &mut dyn Write,
    ) -> SuiteResult<SuiteReport> {
        let cases = registry.all();
        let layout = Layout::measure(&cases);

        renderer.begin(&layout, out)?;
        let mut report = SuiteReport::default();
        for case in &cases {
            let case_report = execute(case);
            renderer.row(&layout, &case_report, out)?;
            report.cases.push(case_report);
        }
        renderer.finish(&layout, &report, out)?;
        out.flush()?;

        info!(
            total = report.len(),
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            verdict = report.verdict(),
            "test run finished"
        );
        Ok(report)
    }
}

/// Process a single case: skip it, or run its body inside a panic boundary.
pub fn execute(case: &TestCase) -> CaseReport {
    let start = Instant::now();
    let outcome = match case.skip_reason() {
        Some(reason) => Outcome::Skipped { reason },
        None => match panic::catch_unwind(AssertUnwindSafe(|| case.run_body())) {
            Ok(true) => Outcome::Pass,
            Ok(false) => Outcome::Fail { reason: None },
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(name = %case.name(), %message, "test body panicked");
                Outcome::Fail {
                    reason: Some(FailReason::Panicked { message }),
                }
            }
        },
    };
    let duration = if outcome.is_skipped() {
        Duration::ZERO
    } else {
        start.elapsed()
    };
    debug!(name = %case.name(), outcome = outcome.label(), ?duration, "processed test case");

    CaseReport {
        name: case.name().to_string(),
        description: case.description().to_string(),
        outcome,
        duration,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
