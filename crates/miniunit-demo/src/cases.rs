//! Cases exercised by the demo

use miniunit::TestBody;

miniunit::test_case!(TEST1, "Test description", { true });

miniunit::test_case!(TEST2, "This test should fail", { false });

/// A case with its own state, set up when the registry is created
pub struct CustomCase {
    inputs: Vec<&'static str>,
}

impl Default for CustomCase {
    fn default() -> Self {
        Self {
            inputs: vec!["1", "22", "333"],
        }
    }
}

impl TestBody for CustomCase {
    fn run(&self) -> bool {
        self.inputs.iter().all(|s| s.parse::<u32>().is_ok())
    }
}

miniunit::register_case!(CustomCase, "TEST3", "Custom test case");

miniunit::test_case!(TEST4, "Throw exception", { panic!("Oh my god!") });
