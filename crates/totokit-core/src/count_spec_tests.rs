//! Tests for the count-spec grammar and interval narrowing.

use crate::count_spec::{narrow_complements, CountRange, CountSpecError};

#[test]
fn empty_spec_is_unconstrained() {
    assert_eq!(CountRange::parse("", 0, 6), Ok(CountRange::new(0, 6)));
    assert_eq!(CountRange::parse("  ", 1, 6), Ok(CountRange::new(1, 6)));
}

#[test]
fn single_number_is_an_exact_count() {
    assert_eq!(CountRange::parse("3", 0, 6), Ok(CountRange::new(3, 3)));
    assert_eq!(CountRange::parse("0", 0, 6), Ok(CountRange::new(0, 0)));
}

#[test]
fn dashed_spec_is_an_inclusive_range() {
    assert_eq!(CountRange::parse("2-5", 0, 6), Ok(CountRange::new(2, 5)));
    assert_eq!(CountRange::parse("0-6", 0, 6), Ok(CountRange::new(0, 6)));
    assert_eq!(CountRange::parse("4-4", 0, 6), Ok(CountRange::new(4, 4)));
}

#[test]
fn malformed_specs_are_rejected() {
    for spec in ["abc", "1-x", "-3", "1-2-3", "3-1", "7", "2-9"] {
        assert_eq!(
            CountRange::parse(spec, 0, 6),
            Err(CountSpecError),
            "spec {spec:?} should be invalid"
        );
    }
}

#[test]
fn lower_default_bound_is_enforced() {
    // Run-length specs start at 1.
    assert_eq!(CountRange::parse("0", 1, 6), Err(CountSpecError));
    assert_eq!(CountRange::parse("1", 1, 6), Ok(CountRange::new(1, 1)));
}

#[test]
fn narrowing_tightens_both_intervals() {
    let mut odd = CountRange::new(0, 6);
    let mut even = CountRange::new(5, 6);

    let out = narrow_complements(&mut odd, &mut even, 6);
    assert_eq!(odd, CountRange::new(0, 1));
    assert_eq!(even, CountRange::new(5, 6));
    assert!(out.a_max_lowered);
    assert!(!out.a_min_raised);
    assert!(!out.b_min_raised);
    assert!(!out.b_max_lowered);
}

#[test]
fn narrowing_is_sequential() {
    // even.max is tightened against the already-raised odd.min.
    let mut odd = CountRange::new(0, 6);
    let mut even = CountRange::new(0, 2);

    let out = narrow_complements(&mut odd, &mut even, 6);
    assert_eq!(odd, CountRange::new(4, 6));
    assert_eq!(even, CountRange::new(0, 2));
    assert!(out.a_min_raised);
    assert!(!out.b_max_lowered);
}

#[test]
fn narrowing_leaves_consistent_pairs_untouched() {
    let mut low = CountRange::new(2, 4);
    let mut high = CountRange::new(2, 4);

    let out = narrow_complements(&mut low, &mut high, 6);
    assert_eq!(low, CountRange::new(2, 4));
    assert_eq!(high, CountRange::new(2, 4));
    assert_eq!(out, Default::default());
}
