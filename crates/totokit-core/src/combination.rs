//! Combinations and their derived statistics.

use serde::Serialize;

use crate::pool::{decade_of, parity_of, tier_of, Parity, Tier};
use crate::universe::UniverseInfo;

/// One drawn combination: a sorted set of distinct numbers, immutable
/// once produced.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Combination {
    numbers: Vec<u8>,
}

impl Combination {
    /// Builds a combination from the given numbers, sorting them.
    pub fn new(mut numbers: Vec<u8>) -> Self {
        numbers.sort_unstable();
        debug_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        Combination { numbers }
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, n: u8) -> bool {
        self.numbers.binary_search(&n).is_ok()
    }

    /// Derives the read-only summary statistics for display and
    /// post-generation verification.
    pub fn summary(&self, info: &UniverseInfo) -> Summary {
        let mut summary = Summary {
            sum: 0,
            average: 0,
            odd: 0,
            even: 0,
            low: 0,
            high: 0,
            decades: vec![0; info.groups],
        };

        for &n in &self.numbers {
            summary.sum += n as u32;
            match parity_of(n) {
                Parity::Odd => summary.odd += 1,
                Parity::Even => summary.even += 1,
            }
            match tier_of(n, info.low) {
                Tier::Low => summary.low += 1,
                Tier::High => summary.high += 1,
            }
            summary.decades[decade_of(n)] += 1;
        }

        if !self.numbers.is_empty() {
            let len = self.numbers.len() as f64;
            summary.average = (summary.sum as f64 / len).round() as u32;
        }
        summary
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for n in &self.numbers {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{n}")?;
            first = false;
        }
        Ok(())
    }
}

/// Per-combination statistics: sum, rounded average and the count of
/// members along each classification axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub sum: u32,
    pub average: u32,
    pub odd: u32,
    pub even: u32,
    pub low: u32,
    pub high: u32,
    pub decades: Vec<u32>,
}

impl Summary {
    pub fn odd_even(&self) -> String {
        format!("{}/{}", self.odd, self.even)
    }

    pub fn low_high(&self) -> String {
        format!("{}/{}", self.low, self.high)
    }

    /// Display label for a decade bucket ("1-10", "11-20", ...).
    pub fn decade_label(idx: usize) -> String {
        let start = idx * 10 + 1;
        format!("{}-{}", start, start + 9)
    }
}

/// Run structure of a sorted slice of distinct numbers: the longest
/// run of consecutive integers, and how many runs of length two or
/// more it contains.
pub fn run_stats(sorted: &[u8]) -> (u32, u32) {
    let mut longest = 0u32;
    let mut runs = 0u32;
    let mut current = 0u32;

    for (i, &n) in sorted.iter().enumerate() {
        if i > 0 && n == sorted[i - 1] + 1 {
            current += 1;
        } else {
            if current >= 2 {
                runs += 1;
            }
            current = 1;
        }
        longest = longest.max(current);
    }
    if current >= 2 {
        runs += 1;
    }
    (longest, runs)
}
