//! Partitioned number pools.
//!
//! Every candidate number is classified along three independent axes:
//! parity (odd/even), tier (low/high) and decade bucket. A [`Pool`]
//! keeps one [`FacetSet`] for the whole universe plus one per decade,
//! and every insert/remove touches all of them atomically, so no
//! projection can ever disagree with `all`.

use std::fmt;

/// Parity classification of a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

/// Tier classification: below-or-at the `low` boundary, or above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Low,
    High,
}

/// A set of numbers in `1..=127`, backed by a `u128` bitmask.
///
/// Insert, remove and membership are O(1); length is a popcount.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NumberSet(u128);

impl NumberSet {
    pub const EMPTY: NumberSet = NumberSet(0);

    #[inline]
    pub fn insert(&mut self, n: u8) {
        self.0 |= 1u128 << n;
    }

    #[inline]
    pub fn remove(&mut self, n: u8) {
        self.0 &= !(1u128 << n);
    }

    #[inline]
    pub fn contains(&self, n: u8) -> bool {
        self.0 & (1u128 << n) != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> Iter {
        Iter(self.0)
    }

    /// Returns the `k`-th member in ascending order, if any.
    ///
    /// This is the primitive behind uniform random picks: draw a
    /// uniform index in `0..len` and select that member without
    /// materializing the set.
    pub fn nth_member(&self, k: usize) -> Option<u8> {
        let mut bits = self.0;
        for _ in 0..k {
            if bits == 0 {
                return None;
            }
            bits &= bits - 1;
        }
        if bits == 0 {
            None
        } else {
            Some(bits.trailing_zeros() as u8)
        }
    }
}

impl FromIterator<u8> for NumberSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = NumberSet::EMPTY;
        for n in iter {
            set.insert(n);
        }
        set
    }
}

impl fmt::Debug for NumberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Ascending iterator over a [`NumberSet`].
pub struct Iter(u128);

impl Iterator for Iter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let n = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(n)
    }
}

/// The nine projections of one set of numbers.
///
/// Invariant: a number in `all` appears in exactly one parity
/// projection, one tier projection and one parity-tier projection.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct FacetSet {
    pub all: NumberSet,
    pub odd: NumberSet,
    pub even: NumberSet,
    pub low: NumberSet,
    pub high: NumberSet,
    pub odd_low: NumberSet,
    pub odd_high: NumberSet,
    pub even_low: NumberSet,
    pub even_high: NumberSet,
}

impl FacetSet {
    pub fn insert(&mut self, n: u8, low: u8) {
        self.all.insert(n);
        match (parity_of(n), tier_of(n, low)) {
            (Parity::Odd, Tier::Low) => {
                self.odd.insert(n);
                self.low.insert(n);
                self.odd_low.insert(n);
            }
            (Parity::Odd, Tier::High) => {
                self.odd.insert(n);
                self.high.insert(n);
                self.odd_high.insert(n);
            }
            (Parity::Even, Tier::Low) => {
                self.even.insert(n);
                self.low.insert(n);
                self.even_low.insert(n);
            }
            (Parity::Even, Tier::High) => {
                self.even.insert(n);
                self.high.insert(n);
                self.even_high.insert(n);
            }
        }
    }

    pub fn remove(&mut self, n: u8) {
        self.all.remove(n);
        self.odd.remove(n);
        self.even.remove(n);
        self.low.remove(n);
        self.high.remove(n);
        self.odd_low.remove(n);
        self.odd_high.remove(n);
        self.even_low.remove(n);
        self.even_high.remove(n);
    }

    /// Selects the projection matching an optional parity and tier.
    ///
    /// `(None, None)` is `all`; a single axis selects `odd`/`even` or
    /// `low`/`high`; both select the combined projection.
    pub fn projection(&self, parity: Option<Parity>, tier: Option<Tier>) -> &NumberSet {
        match (parity, tier) {
            (None, None) => &self.all,
            (Some(Parity::Odd), None) => &self.odd,
            (Some(Parity::Even), None) => &self.even,
            (None, Some(Tier::Low)) => &self.low,
            (None, Some(Tier::High)) => &self.high,
            (Some(Parity::Odd), Some(Tier::Low)) => &self.odd_low,
            (Some(Parity::Odd), Some(Tier::High)) => &self.odd_high,
            (Some(Parity::Even), Some(Tier::Low)) => &self.even_low,
            (Some(Parity::Even), Some(Tier::High)) => &self.even_high,
        }
    }
}

#[inline]
pub fn parity_of(n: u8) -> Parity {
    if n % 2 == 0 {
        Parity::Even
    } else {
        Parity::Odd
    }
}

#[inline]
pub fn tier_of(n: u8, low: u8) -> Tier {
    if n <= low {
        Tier::Low
    } else {
        Tier::High
    }
}

/// Returns the decade bucket index of a number (`1..=10` -> 0,
/// `11..=20` -> 1, ...).
#[inline]
pub fn decade_of(n: u8) -> usize {
    (n as usize - 1) / 10
}

/// A partitioned pool: the whole-universe facet set plus one facet set
/// per decade bucket.
///
/// `Clone` performs a deep copy; callers that receive a cached pool
/// must clone it before mutating.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Pool {
    pub whole: FacetSet,
    decades: Vec<FacetSet>,
}

impl Pool {
    /// An empty pool with `groups` decade buckets.
    pub fn new(groups: usize) -> Self {
        Pool {
            whole: FacetSet::default(),
            decades: vec![FacetSet::default(); groups],
        }
    }

    pub fn groups(&self) -> usize {
        self.decades.len()
    }

    pub fn decade(&self, idx: usize) -> &FacetSet {
        &self.decades[idx]
    }

    pub fn len(&self) -> usize {
        self.whole.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.whole.all.is_empty()
    }

    pub fn contains(&self, n: u8) -> bool {
        self.whole.all.contains(n)
    }

    /// Inserts `n`, classifying it into every matching projection of
    /// the whole set and of its decade bucket.
    pub fn insert(&mut self, n: u8, low: u8) {
        self.whole.insert(n, low);
        self.decades[decade_of(n)].insert(n, low);
    }

    /// Removes `n` from every projection everywhere.
    pub fn remove(&mut self, n: u8) {
        self.whole.remove(n);
        self.decades[decade_of(n)].remove(n);
    }
}
