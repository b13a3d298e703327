//! Universe presets and the process-wide base-pool cache.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::pool::Pool;

/// The supported draw ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Universe {
    Thirty,
    ThirtyFive,
    FortyNine,
    Fifty,
    FiftyFive,
    FiftyEight,
    SixtyNine,
}

/// Fixed parameters of a universe: the `1..=max` range, the low/high
/// boundary and the number of 10-wide decade buckets covering it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniverseInfo {
    pub min: u8,
    pub max: u8,
    pub low: u8,
    pub groups: usize,
}

impl UniverseInfo {
    /// Total count of numbers in the universe.
    pub fn size(&self) -> u32 {
        (self.max - self.min + 1) as u32
    }
}

impl Universe {
    pub const ALL: [Universe; 7] = [
        Universe::Thirty,
        Universe::ThirtyFive,
        Universe::FortyNine,
        Universe::Fifty,
        Universe::FiftyFive,
        Universe::FiftyEight,
        Universe::SixtyNine,
    ];

    pub fn info(self) -> UniverseInfo {
        let (max, low, groups) = match self {
            Universe::Thirty => (30, 15, 3),
            Universe::ThirtyFive => (35, 17, 4),
            Universe::FortyNine => (49, 24, 5),
            Universe::Fifty => (50, 25, 5),
            Universe::FiftyFive => (55, 27, 6),
            Universe::FiftyEight => (58, 29, 6),
            Universe::SixtyNine => (69, 34, 7),
        };
        UniverseInfo {
            min: 1,
            max,
            low,
            groups,
        }
    }

    fn index(self) -> usize {
        match self {
            Universe::Thirty => 0,
            Universe::ThirtyFive => 1,
            Universe::FortyNine => 2,
            Universe::Fifty => 3,
            Universe::FiftyFive => 4,
            Universe::FiftyEight => 5,
            Universe::SixtyNine => 6,
        }
    }

    /// Returns the cached, fully populated pool for this universe.
    ///
    /// Built once per process on first use. The cache is immutable:
    /// every consumer must clone before mutating.
    pub fn base_pool(self) -> &'static Pool {
        static POOLS: [OnceLock<Pool>; 7] = [const { OnceLock::new() }; 7];
        POOLS[self.index()].get_or_init(|| {
            let info = self.info();
            let mut pool = Pool::new(info.groups);
            for n in info.min..=info.max {
                pool.insert(n, info.low);
            }
            pool
        })
    }

    /// A mutable deep copy of the base pool.
    pub fn fresh_pool(self) -> Pool {
        self.base_pool().clone()
    }
}
