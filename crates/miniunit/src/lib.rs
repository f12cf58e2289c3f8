//! miniunit - a minimal self-registering test-case runner
//!
//! Test cases are declared at module scope and registered without any
//! central list. The runner executes them one at a time in registration
//! order, turns panics into failures, and prints a pass/fail/skip table.
//!
//! # Example
//!
//! ```no_run
//! use std::process::ExitCode;
//!
//! miniunit::test_case!(TEST1, "Test description", { true });
//! miniunit::test_case!(TEST2, "This test should fail", { false });
//!
//! fn main() -> ExitCode {
//!     miniunit::skip!(TEST1, "testing skip").unwrap();
//!     miniunit::run_main()
//! }
//! ```

mod case;
mod declare;
mod error;
mod registry;
mod render;
mod runner;

pub use case::{TestBody, TestCase};
pub use declare::{Declaration, DeclaredBody};
pub use error::{SuiteError, SuiteResult};
pub use registry::{all, register, skip, Registry};
pub use render::{verdict_label, Layout, Renderer, TableRenderer};
pub use runner::{execute, CaseReport, FailReason, Outcome, Runner, SuiteReport, PANIC_MARKER};

use std::process::ExitCode;
use tracing::error;

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}

/// Run every registered case with colored output and return the verdict.
///
/// A report that cannot be written counts as a failed run.
pub fn run() -> bool {
    run_with_color(true)
}

/// Like [`run`], with color switched on or off
pub fn run_with_color(color: bool) -> bool {
    match Runner::new().with_color(color).run() {
        Ok(report) => report.verdict(),
        Err(e) => {
            error!("test run aborted: {}", e);
            false
        }
    }
}

/// Run every registered case and map the verdict to an exit code
pub fn run_main() -> ExitCode {
    match Runner::new().run() {
        Ok(report) => report.exit_code(),
        Err(e) => {
            error!("test run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
