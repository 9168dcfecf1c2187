//! Property-based tests for version ordering and config validation.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use tubedeck_cli::domain::InterpreterVersion;
use tubedeck_cli::domain::config::validate_container_name;
use tubedeck_cli::domain::version::extract_version;

fn version(parts: &[u64]) -> InterpreterVersion {
    InterpreterVersion::new(parts.to_vec())
}

// ============================================================================
// InterpreterVersion ordering
// ============================================================================

proptest! {
    /// Trailing zero components never change the comparison.
    #[test]
    fn prop_trailing_zeros_are_equal(major in 0u64..50, minor in 0u64..50) {
        prop_assert_eq!(version(&[major, minor]), version(&[major, minor, 0]));
        prop_assert!(version(&[major, minor, 0]).satisfies(&version(&[major, minor])));
    }

    /// Ordering is numeric per component, never lexical.
    #[test]
    fn prop_numeric_minor_ordering(major in 0u64..10, a in 0u64..200, b in 0u64..200) {
        let va = version(&[major, a]);
        let vb = version(&[major, b]);
        prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
    }

    /// A higher major always wins regardless of minor.
    #[test]
    fn prop_major_dominates(major in 0u64..10, a in 0u64..200, b in 0u64..200) {
        prop_assert!(version(&[major + 1, a]) > version(&[major, b]));
    }

    /// Display then parse is lossless.
    #[test]
    fn prop_display_parses_back(parts in proptest::collection::vec(0u64..1000, 1..4)) {
        let v = version(&parts);
        let back: InterpreterVersion = v.to_string().parse().expect("parse");
        prop_assert_eq!(back.parts(), parts.as_slice());
    }

    /// Version banners are extracted wherever the number appears.
    #[test]
    fn prop_extract_from_banner(major in 2u64..4, minor in 0u64..20, patch in 0u64..20) {
        let banner = format!("Python {major}.{minor}.{patch}\n");
        let v = extract_version(&banner).expect("extract");
        prop_assert_eq!(v.parts(), &[major, minor, patch][..]);
    }
}

#[test]
fn test_three_ten_satisfies_three_nine() {
    assert!(version(&[3, 10]).satisfies(&version(&[3, 9])));
    assert!(!version(&[3, 8]).satisfies(&version(&[3, 9])));
}

// ============================================================================
// validate_container_name()
// ============================================================================

proptest! {
    /// Docker-style names are accepted.
    #[test]
    fn prop_valid_names_accepted(name in "[a-z0-9][a-z0-9_.-]{0,30}") {
        prop_assert!(validate_container_name(&name).is_ok(), "rejected: {name}");
    }

    /// Names with whitespace or slashes are rejected.
    #[test]
    fn prop_names_with_separators_rejected(
        head in "[a-z]{1,8}",
        sep in "[ /:]",
        tail in "[a-z]{1,8}",
    ) {
        let name = format!("{head}{sep}{tail}");
        prop_assert!(validate_container_name(&name).is_err(), "accepted: {name}");
    }
}
