//! Link-time declaration of test cases
//!
//! [`test_case!`](crate::test_case) and [`register_case!`](crate::register_case)
//! submit a static [`Declaration`] through `inventory`. The global registry
//! turns every declaration into a [`TestCase`] the first time it is used.

use crate::case::{TestBody, TestCase};
use tracing::error;

/// How a declared case produces its body
#[derive(Clone, Copy)]
pub enum DeclaredBody {
    /// A plain function, from `test_case!`
    Function(fn() -> bool),
    /// A constructor for a custom case type, from `register_case!`
    Custom(fn() -> Box<dyn TestBody>),
}

/// A test case declared at module scope
pub struct Declaration {
    name: &'static str,
    description: &'static str,
    file: &'static str,
    line: u32,
    body: DeclaredBody,
}

impl Declaration {
    pub const fn function(
        name: &'static str,
        description: &'static str,
        file: &'static str,
        line: u32,
        body: fn() -> bool,
    ) -> Self {
        Self {
            name,
            description,
            file,
            line,
            body: DeclaredBody::Function(body),
        }
    }

    pub const fn custom(
        name: &'static str,
        description: &'static str,
        file: &'static str,
        line: u32,
        make: fn() -> Box<dyn TestBody>,
    ) -> Self {
        Self {
            name,
            description,
            file,
            line,
            body: DeclaredBody::Custom(make),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Source position of the declaring macro invocation
    pub fn location(&self) -> (&'static str, u32) {
        (self.file, self.line)
    }

    fn instantiate(&self) -> Option<TestCase> {
        let body: Box<dyn TestBody> = match self.body {
            DeclaredBody::Function(f) => Box::new(f),
            DeclaredBody::Custom(make) => make(),
        };
        match TestCase::from_boxed(self.name, self.description, body) {
            Ok(case) => Some(case),
            Err(e) => {
                error!(file = self.file, line = self.line, "dropping declared test case: {}", e);
                None
            }
        }
    }
}

inventory::collect!(Declaration);

/// Instantiate every declared case in declaration order.
///
/// `inventory` yields declarations in no particular order, so they are
/// sorted by source file and then line.
pub(crate) fn declared_cases() -> Vec<TestCase> {
    let mut declarations: Vec<&'static Declaration> = inventory::iter::<Declaration>
        .into_iter()
        .collect();
    declarations.sort_by_key(|d| d.location());
    declarations
        .into_iter()
        .filter_map(Declaration::instantiate)
        .collect()
}

/// Declare a test case and register it.
///
/// ```
/// miniunit::test_case!(ADDITION, "Integer addition works", {
///     1 + 1 == 2
/// });
/// ```
///
/// The body block must evaluate to `bool`. It may panic, which counts as a
/// failure. The macro also defines a function named after the case.
#[macro_export]
macro_rules! test_case {
    ($name:ident, $description:expr, $body:block) => {
        #[allow(non_snake_case, dead_code)]
        fn $name() -> bool $body

        $crate::__private::inventory::submit! {
            $crate::Declaration::function(
                ::std::stringify!($name),
                $description,
                ::std::file!(),
                ::std::line!(),
                $name,
            )
        }
    };
}

/// Register a custom case type.
///
/// The type must implement [`Default`] and [`TestBody`](crate::TestBody).
/// One instance is created when the registry is first used; `Default` is the
/// setup hook. The constructor must not touch the registry in any way: no
/// `TestCase::declare`, `skip`, `all` or `run`. Doing so panics.
///
/// ```
/// use miniunit::TestBody;
///
/// #[derive(Default)]
/// struct Parser;
///
/// impl TestBody for Parser {
///     fn run(&self) -> bool {
///         "42".parse::<u32>().is_ok()
///     }
/// }
///
/// miniunit::register_case!(Parser, "PARSER", "Parses a number");
/// ```
#[macro_export]
macro_rules! register_case {
    ($ty:ty, $name:literal, $description:expr) => {
        const _: () = ::std::assert!(!$name.is_empty(), "test case name must not be empty");

        $crate::__private::inventory::submit! {
            $crate::Declaration::custom(
                $name,
                $description,
                ::std::file!(),
                ::std::line!(),
                || -> ::std::boxed::Box<dyn $crate::TestBody> {
                    ::std::boxed::Box::new(<$ty as ::std::default::Default>::default())
                },
            )
        }
    };
}

/// Mark every registered case with the given name as skipped.
///
/// Evaluates to [`SuiteResult<usize>`](crate::SuiteResult), the number of
/// cases marked.
#[macro_export]
macro_rules! skip {
    ($name:ident, $reason:expr) => {
        $crate::skip(::std::stringify!($name), $reason)
    };
    ($name:literal, $reason:expr) => {
        $crate::skip($name, $reason)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_true() -> bool {
        true
    }

    struct Probe;

    impl TestBody for Probe {
        fn run(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_function_declaration_instantiates() {
        let decl = Declaration::function("T1", "plain", "src/a.rs", 3, always_true);
        let case = decl.instantiate().unwrap();
        assert_eq!(case.name(), "T1");
        assert_eq!(case.description(), "plain");
        assert!(case.run_body());
    }

    #[test]
    fn test_custom_declaration_instantiates() {
        let decl = Declaration::custom("T3", "custom", "src/a.rs", 9, || -> Box<dyn TestBody> {
            Box::new(Probe)
        });
        let case = decl.instantiate().unwrap();
        assert!(!case.run_body());
    }

    #[test]
    fn test_empty_name_declaration_is_dropped() {
        let decl = Declaration::function("", "nameless", "src/a.rs", 1, always_true);
        assert!(decl.instantiate().is_none());
    }

    #[test]
    fn test_location_orders_by_file_then_line() {
        let mut decls = [
            Declaration::function("C", "", "src/b.rs", 1, always_true),
            Declaration::function("B", "", "src/a.rs", 20, always_true),
            Declaration::function("A", "", "src/a.rs", 3, always_true),
        ];
        decls.sort_by_key(|d| d.location());
        let names: Vec<_> = decls.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
