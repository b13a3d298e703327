//! Tests for the partitioned pool model.

use crate::pool::{decade_of, NumberSet, Pool};
use crate::universe::Universe;

#[test]
fn number_set_basics() {
    let mut set = NumberSet::EMPTY;
    assert!(set.is_empty());

    set.insert(3);
    set.insert(49);
    set.insert(3);
    assert_eq!(set.len(), 2);
    assert!(set.contains(3));
    assert!(set.contains(49));
    assert!(!set.contains(4));

    set.remove(3);
    assert_eq!(set.len(), 1);
    assert!(!set.contains(3));

    set.remove(4); // absent, no-op
    assert_eq!(set.len(), 1);
}

#[test]
fn number_set_iterates_ascending() {
    let set: NumberSet = [9, 1, 30, 14].into_iter().collect();
    let members: Vec<u8> = set.iter().collect();
    assert_eq!(members, vec![1, 9, 14, 30]);
}

#[test]
fn number_set_nth_member() {
    let set: NumberSet = [5, 12, 27].into_iter().collect();
    assert_eq!(set.nth_member(0), Some(5));
    assert_eq!(set.nth_member(1), Some(12));
    assert_eq!(set.nth_member(2), Some(27));
    assert_eq!(set.nth_member(3), None);
    assert_eq!(NumberSet::EMPTY.nth_member(0), None);
}

#[test]
fn decade_buckets() {
    assert_eq!(decade_of(1), 0);
    assert_eq!(decade_of(10), 0);
    assert_eq!(decade_of(11), 1);
    assert_eq!(decade_of(20), 1);
    assert_eq!(decade_of(49), 4);
    assert_eq!(decade_of(50), 4);
    assert_eq!(decade_of(51), 5);
}

#[test]
fn forty_nine_base_pool_projection_sizes() {
    let pool = Universe::FortyNine.base_pool();

    assert_eq!(pool.len(), 49);
    assert_eq!(pool.whole.odd.len(), 25);
    assert_eq!(pool.whole.even.len(), 24);
    assert_eq!(pool.whole.low.len(), 24);
    assert_eq!(pool.whole.high.len(), 25);
    assert_eq!(pool.whole.odd_low.len(), 12);
    assert_eq!(pool.whole.odd_high.len(), 13);
    assert_eq!(pool.whole.even_low.len(), 12);
    assert_eq!(pool.whole.even_high.len(), 12);

    assert_eq!(pool.groups(), 5);
    assert_eq!(pool.decade(0).all.len(), 10);
    assert_eq!(pool.decade(3).all.len(), 10);
    assert_eq!(pool.decade(4).all.len(), 9);
}

#[test]
fn every_member_sits_in_exactly_one_projection_per_axis() {
    let pool = Universe::SixtyNine.base_pool();
    for n in 1..=69u8 {
        assert!(pool.contains(n));
        assert_eq!(pool.whole.odd.contains(n), !pool.whole.even.contains(n));
        assert_eq!(pool.whole.low.contains(n), !pool.whole.high.contains(n));

        let combined = [
            pool.whole.odd_low.contains(n),
            pool.whole.odd_high.contains(n),
            pool.whole.even_low.contains(n),
            pool.whole.even_high.contains(n),
        ];
        assert_eq!(combined.iter().filter(|&&c| c).count(), 1);

        for d in 0..pool.groups() {
            assert_eq!(pool.decade(d).all.contains(n), d == decade_of(n));
        }
    }
}

#[test]
fn remove_clears_every_projection() {
    let mut pool = Universe::Thirty.fresh_pool();

    // 13 is odd, low (boundary 15), decade 1
    pool.remove(13);
    assert!(!pool.whole.all.contains(13));
    assert!(!pool.whole.odd.contains(13));
    assert!(!pool.whole.low.contains(13));
    assert!(!pool.whole.odd_low.contains(13));
    assert!(!pool.decade(1).all.contains(13));
    assert!(!pool.decade(1).odd_low.contains(13));
    assert_eq!(pool.len(), 29);
}

#[test]
fn insert_classifies_into_matching_projections() {
    let info = Universe::Thirty.info();
    let mut pool = Pool::new(info.groups);

    // 22 is even, high (boundary 15), decade 2
    pool.insert(22, info.low);
    assert!(pool.whole.even.contains(22));
    assert!(pool.whole.high.contains(22));
    assert!(pool.whole.even_high.contains(22));
    assert!(pool.decade(2).even_high.contains(22));
    assert!(!pool.whole.odd.contains(22));
    assert!(!pool.whole.low.contains(22));
}

#[test]
fn clone_is_a_deep_copy() {
    let original = Universe::Thirty.base_pool();
    let before = original.clone();

    let mut copy = original.clone();
    for n in 1..=30u8 {
        copy.remove(n);
    }
    assert!(copy.is_empty());
    assert_eq!(*original, before);
    assert_eq!(original.len(), 30);
}

#[test]
fn base_pool_is_cached() {
    let a = Universe::Fifty.base_pool() as *const Pool;
    let b = Universe::Fifty.base_pool() as *const Pool;
    assert_eq!(a, b);
}
