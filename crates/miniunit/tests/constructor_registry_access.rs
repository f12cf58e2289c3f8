//! A custom case constructor that reaches back into the registry

use miniunit::TestBody;
use std::panic;

struct Meddling;

impl Default for Meddling {
    fn default() -> Self {
        let _ = miniunit::all();
        Meddling
    }
}

impl TestBody for Meddling {
    fn run(&self) -> bool {
        true
    }
}

miniunit::register_case!(Meddling, "MEDDLING", "Reads the registry while it is created");

#[test]
fn test_registry_access_from_constructor_panics() {
    let result = panic::catch_unwind(miniunit::all);
    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    assert!(message.contains("must not access the test registry"));
}
