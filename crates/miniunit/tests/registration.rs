//! Registration and execution through the global registry
//!
//! Every case below is declared at module scope and reaches the registry
//! without being listed anywhere.

use miniunit::{Outcome, Registry, Runner, SuiteError, TableRenderer, TestBody, TestCase};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

static ECHO_RAN: AtomicBool = AtomicBool::new(false);
static FIXTURES_CREATED: AtomicUsize = AtomicUsize::new(0);

miniunit::test_case!(ALPHA, "Returns true", { true });

miniunit::test_case!(BRAVO, "Returns false", { false });

struct Fixture {
    value: u32,
}

impl Default for Fixture {
    fn default() -> Self {
        FIXTURES_CREATED.fetch_add(1, Ordering::SeqCst);
        Self { value: 7 }
    }
}

impl TestBody for Fixture {
    fn run(&self) -> bool {
        self.value == 7
    }
}

miniunit::register_case!(Fixture, "CHARLIE", "Custom case type");

miniunit::test_case!(DELTA, "Panics", {
    let values: Vec<u32> = Vec::new();
    values[3] == 0
});

miniunit::test_case!(ECHO, "Skipped before the run", {
    ECHO_RAN.store(true, Ordering::SeqCst);
    true
});

fn prepare() {
    assert_eq!(miniunit::skip!(ECHO, "flaky").unwrap(), 1);
}

fn render() -> (String, miniunit::SuiteReport) {
    let mut out = Vec::new();
    let report = Runner::new()
        .with_color(false)
        .run_with(Registry::global(), &mut TableRenderer::new(false), &mut out)
        .unwrap();
    (String::from_utf8(out).unwrap(), report)
}

#[test]
#[serial]
fn test_declared_cases_are_registered_in_declaration_order() {
    prepare();
    let names: Vec<String> = miniunit::all()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(&names[..5], &["ALPHA", "BRAVO", "CHARLIE", "DELTA", "ECHO"]);
}

#[test]
#[serial]
fn test_outcomes_follow_bodies() {
    prepare();
    let (_, report) = render();
    let outcomes: Vec<(&str, &Outcome)> = report
        .cases
        .iter()
        .take(5)
        .map(|c| (c.name.as_str(), &c.outcome))
        .collect();

    assert_eq!(outcomes[0], ("ALPHA", &Outcome::Pass));
    assert_eq!(outcomes[1], ("BRAVO", &Outcome::Fail { reason: None }));
    assert_eq!(outcomes[2], ("CHARLIE", &Outcome::Pass));
    assert_eq!(outcomes[3].0, "DELTA");
    assert_eq!(outcomes[3].1.comment(), miniunit::PANIC_MARKER);
    assert_eq!(
        outcomes[4],
        (
            "ECHO",
            &Outcome::Skipped {
                reason: "flaky".to_string()
            }
        )
    );
    assert!(!report.verdict());
}

#[test]
#[serial]
fn test_skipped_body_never_runs() {
    prepare();
    render();
    render();
    assert!(!ECHO_RAN.load(Ordering::SeqCst));
}

#[test]
#[serial]
fn test_repeated_runs_are_identical() {
    prepare();
    let (first, first_report) = render();
    let (second, second_report) = render();
    assert_eq!(first, second);
    assert_eq!(first_report.verdict(), second_report.verdict());
    assert!(first.ends_with("Result: FAIL\n"));
}

#[test]
#[serial]
fn test_custom_case_is_instantiated_once() {
    prepare();
    render();
    let _ = miniunit::all();
    assert_eq!(FIXTURES_CREATED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_runtime_declaration_is_appended() {
    prepare();
    let before = Registry::global().len();
    let handle = TestCase::declare("LATE", "Declared at runtime", || true).unwrap();

    let cases = miniunit::all();
    assert_eq!(cases.len(), before + 1);
    assert_eq!(cases.last().unwrap().name(), "LATE");

    handle.mark_skip("not needed").unwrap();
    let (out, _) = render();
    assert!(out.contains("[LATE] "));
    assert!(out.contains("SKIP not needed"));
}

#[test]
#[serial]
fn test_skip_unknown_name_fails() {
    let err = miniunit::skip!(NOPE, "missing").unwrap_err();
    assert!(matches!(err, SuiteError::UnknownCase { ref name } if name == "NOPE"));
}

#[test]
#[serial]
fn test_skip_with_empty_reason_fails() {
    let err = miniunit::skip("ALPHA", "").unwrap_err();
    assert!(matches!(err, SuiteError::EmptySkipReason { .. }));
}
