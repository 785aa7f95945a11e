use crate::{
    codegen::{Listing, Target},
    compiler::{self, CompileResult, Unit},
};

/// Each variant contains the expected output.
pub enum Assertion {
    ListingOk(&'static str),
    ExpectedError(&'static str),
}

#[track_caller]
pub fn run_pipeline(
    unit: Unit,
    target: Target,
    declared: &[&str],
    source: &str,
) -> CompileResult<Listing> {
    compiler::compile(source, target, declared, unit)
}

/// Strips the indentation of every line, so that listings may be written with
/// `indoc` regardless of how instructions are indented.
pub fn normalize(listing: &str) -> Vec<&str> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[track_caller]
pub fn run_assertion(assertion: Assertion, actual: &CompileResult<Listing>) {
    match (assertion, actual) {
        (Assertion::ListingOk(expected), Ok(listing)) => {
            let listing = listing.to_string();
            ::pretty_assertions::assert_eq!(normalize(&listing), normalize(expected));
        }
        (Assertion::ListingOk(_), Err(error)) => {
            panic!("expected a listing, but got error `{error:#}`")
        }
        (Assertion::ExpectedError(expected), Err(error)) => {
            ::pretty_assertions::assert_eq!(format!("{error:#}"), expected);
        }
        (Assertion::ExpectedError(expected), Ok(listing)) => {
            panic!("expected error `{expected}`, but got listing:\n{listing}")
        }
    }
}

macro_rules! listing_tests {
    (
        use $unit:ident, $target:ident;

        $($tests_tt:tt)*
    ) => {
        listing_tests!(use $unit, $target, declared []; $($tests_tt)*);
    };

    (
        use $unit:ident, $target:ident, declared $declared:tt;

        $(
            fn $test_name:ident() {
                let source = $source:expr;
                $($assertions_tt:tt)*
            }
        )*
    ) => {
        $(
            #[test]
            fn $test_name() {
                let declared: &[&str] = &$declared;
                let actual = crate::util::test_utils::run_pipeline(
                    listing_tests!(@@unit $unit),
                    crate::codegen::Target::$target,
                    declared,
                    $source,
                );
                listing_tests!(@@expand_assertions, &actual, [$($assertions_tt)*]);
            }
        )*
    };

    (@@expand_assertions, $actual:expr, []) => {};
    (@@expand_assertions, $actual:expr, [
        let $assertion:ident = $assertion_expected:literal;
        $($rest_assertions_tt:tt)*
    ]) => {
        crate::util::test_utils::run_assertion(
            listing_tests!(@@assertion, $assertion, $assertion_expected),
            $actual,
        );
        listing_tests!(@@expand_assertions, $actual, [$($rest_assertions_tt)*]);
    };

    (@@assertion, listing_ok, $expected:literal) => {
        crate::util::test_utils::Assertion::ListingOk(::indoc::indoc! { $expected })
    };
    (@@assertion, expected_error, $expected:literal) => {
        crate::util::test_utils::Assertion::ExpectedError($expected)
    };

    (@@unit program) => { crate::compiler::Unit::Program };
    (@@unit block) => { crate::compiler::Unit::Block };
    (@@unit condition) => { crate::compiler::Unit::Condition };
    (@@unit expr) => { crate::compiler::Unit::Expr };
}
pub(crate) use listing_tests;
