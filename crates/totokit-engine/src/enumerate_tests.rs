//! Enumerator tests against closed-form counts and a brute-force
//! reference.

use totokit_core::{run_stats, DrawRequest, Universe};

use crate::enumerate::{count_feasible, spawn_count};
use crate::validate::validate;

fn base(system: u32) -> DrawRequest {
    DrawRequest::new(Universe::Thirty, system)
}

/// Keeps only `1..=10` in play.
fn small(system: u32) -> DrawRequest {
    let mut req = base(system);
    req.must_excludes = (11..=30).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
    req
}

fn count(req: &DrawRequest) -> u64 {
    count_feasible(&validate(req).unwrap())
}

#[test]
fn unconstrained_count_is_the_binomial() {
    assert_eq!(count(&base(3)), 4060); // C(30, 3)
    assert_eq!(count(&base(6)), 593_775); // C(30, 6)
}

#[test]
fn excludes_shrink_the_pool() {
    assert_eq!(count(&small(3)), 120); // C(10, 3)
}

#[test]
fn includes_are_forced() {
    let mut req = small(3);
    req.must_includes = "1,2".into();
    assert_eq!(count(&req), 8); // one free pick among 3..=10
}

#[test]
fn a_fully_included_system_counts_one() {
    let mut req = small(3);
    req.must_includes = "4,7,9".into();
    assert_eq!(count(&req), 1);
}

#[test]
fn custom_group_count_partitions_the_choice() {
    let mut req = small(3);
    req.custom_groups.push(totokit_core::CustomGroupSpec {
        numbers: "1,2,3".into(),
        count: "1".into(),
    });
    assert_eq!(count(&req), 63); // C(3,1) * C(7,2)
}

#[test]
fn parity_count_matches_the_closed_form() {
    let mut req = small(3);
    req.odd = "2".into();
    assert_eq!(count(&req), 50); // C(5,2) * C(5,1)
}

#[test]
fn tier_count_matches_the_closed_form() {
    let mut req = base(3);
    req.low = "2".into();
    assert_eq!(count(&req), 1575); // C(15,2) * C(15,1)
}

#[test]
fn decade_counts_multiply() {
    let mut req = base(6);
    req.decade_counts = vec!["2".into(), "2".into(), "2".into()];
    assert_eq!(count(&req), 91_125); // C(10,2)^3
}

#[test]
fn run_length_cap_counts_nonadjacent_choices() {
    let mut req = small(3);
    req.max_run_length = "1".into();
    assert_eq!(count(&req), 56); // C(8, 3): 3 non-adjacent from 10
}

#[test]
fn parity_count_matches_brute_force() {
    let mut req = small(3);
    req.odd = "1-2".into();
    let expected = brute_force(3, |combo| {
        let odd = combo.iter().filter(|&&n| n % 2 == 1).count();
        (1..=2).contains(&odd)
    });
    assert_eq!(count(&req), expected);
}

#[test]
fn run_rule_matches_brute_force() {
    let mut req = small(4);
    req.max_run_count = "1".into();
    req.max_run_length = "2".into();
    let expected = brute_force(4, |combo| {
        let (longest, runs) = run_stats(combo);
        longest <= 2 && runs <= 1
    });
    assert_eq!(count(&req), expected);
}

#[test]
fn mixed_axes_match_brute_force() {
    let mut req = small(4);
    req.must_includes = "2".into();
    req.odd = "2".into();
    req.low = "4".into();
    req.custom_groups.push(totokit_core::CustomGroupSpec {
        numbers: "5,6,7".into(),
        count: "0-1".into(),
    });
    let expected = brute_force(4, |combo| {
        combo.contains(&2)
            && combo.iter().filter(|&&n| n % 2 == 1).count() == 2
            && combo.iter().filter(|&&n| [5, 6, 7].contains(&n)).count() <= 1
    });
    assert_eq!(count(&req), expected);
}

#[test]
fn detached_count_delivers_the_total() {
    let job = spawn_count(&validate(&base(3)).unwrap());
    assert_eq!(job.join(), Some(4060));
}

#[test]
fn detached_count_can_be_cancelled() {
    let req = DrawRequest::new(Universe::SixtyNine, 7);
    let job = spawn_count(&validate(&req).unwrap());
    job.cancel();
    assert_eq!(job.join(), None);
}

/// Independent reference: walk every k-subset of `1..=10`.
fn brute_force(k: usize, accept: impl Fn(&[u8]) -> bool) -> u64 {
    let mut total = 0;
    let mut combo = vec![0u8; k];
    fn rec(
        start: u8,
        depth: usize,
        combo: &mut Vec<u8>,
        total: &mut u64,
        accept: &impl Fn(&[u8]) -> bool,
    ) {
        let k = combo.len();
        if depth == k {
            if accept(combo) {
                *total += 1;
            }
            return;
        }
        for n in start..=10 {
            combo[depth] = n;
            rec(n + 1, depth + 1, combo, total, accept);
        }
    }
    rec(1, 0, &mut combo, &mut total, &accept);
    total
}
