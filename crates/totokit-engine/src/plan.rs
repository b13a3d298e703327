//! The validated draw plan.
//!
//! A [`Plan`] is the output of the validation pipeline: the surviving
//! pools, every constraint interval after complement narrowing, and the
//! required-count carries that the generator and enumerator consume.
//! Plans hold no strings and no unparsed state; once one exists, every
//! axis has been proven jointly satisfiable.

use smallvec::SmallVec;

use totokit_core::{
    run_stats, Combination, CountRange, Pool, Summary, Universe, UniverseInfo,
};

/// One custom group after validation: its surviving pool and the
/// narrowed count interval it must contribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupPlan {
    pub pool: Pool,
    pub count: CountRange,
}

/// All custom groups together: the per-group plans, the merged pool of
/// every custom number, and the aggregate count interval across groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomPlan {
    pub groups: Vec<GroupPlan>,
    pub merged: Pool,
    pub count: CountRange,
}

impl CustomPlan {
    /// An inert plan for a request with no custom groups.
    pub fn empty(decades: usize) -> Self {
        CustomPlan {
            groups: Vec::new(),
            merged: Pool::new(decades),
            count: CountRange::new(0, 0),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.merged.is_empty()
    }
}

/// How many numbers the draw still owes each axis once must-includes
/// are banked.
///
/// The four parity-tier carries are the pigeonhole residues
/// `required_low + required_odd - required_total` and friends; they go
/// negative whenever the single-axis demands already overlap, so they
/// stay signed and unclamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequiredCounts {
    pub total: u32,
    pub odd: u32,
    pub even: u32,
    pub low: u32,
    pub high: u32,
    pub odd_low: i64,
    pub odd_high: i64,
    pub even_low: i64,
    pub even_high: i64,
}

/// The consecutive-number rule: cap on the longest run and on how many
/// runs (of length two or more) a combination may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunRule {
    pub max_len: u32,
    pub max_runs: u32,
}

impl RunRule {
    pub fn allows(&self, sorted: &[u8]) -> bool {
        let (longest, runs) = run_stats(sorted);
        longest <= self.max_len && runs <= self.max_runs
    }
}

/// A fully validated draw configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub universe: Universe,
    pub info: UniverseInfo,
    /// Numbers per combination.
    pub system: u32,
    /// Combinations per batch.
    pub count: u32,
    pub seed: Option<u64>,
    /// Candidates still drawable: the universe minus includes and
    /// excludes.
    pub available: Pool,
    pub must_include: Pool,
    pub custom: CustomPlan,
    pub odd: CountRange,
    pub even: CountRange,
    pub low: CountRange,
    pub high: CountRange,
    /// Narrowed count interval per decade bucket.
    pub decades: SmallVec<[CountRange; 7]>,
    pub required: RequiredCounts,
    pub runs: Option<RunRule>,
}

impl Plan {
    /// Checks a complete combination against every narrowed interval.
    ///
    /// The generator draws with biased heuristics that track the same
    /// intervals incrementally, so this is the authoritative recheck
    /// before a draw is accepted into a batch.
    pub fn satisfies(&self, combo: &Combination) -> bool {
        if combo.len() != self.system as usize {
            return false;
        }
        let summary = combo.summary(&self.info);
        self.satisfies_summary(combo, &summary)
    }

    fn satisfies_summary(&self, combo: &Combination, summary: &Summary) -> bool {
        if !self.odd.contains(summary.odd)
            || !self.even.contains(summary.even)
            || !self.low.contains(summary.low)
            || !self.high.contains(summary.high)
        {
            return false;
        }
        for (idx, range) in self.decades.iter().enumerate() {
            if !range.contains(summary.decades[idx]) {
                return false;
            }
        }

        // Every must-include present, nothing outside the allowed pool.
        if !self
            .must_include
            .whole
            .all
            .iter()
            .all(|n| combo.contains(n))
        {
            return false;
        }
        if !combo
            .numbers()
            .iter()
            .all(|&n| self.available.contains(n) || self.must_include.contains(n))
        {
            return false;
        }

        for group in &self.custom.groups {
            let hits = combo
                .numbers()
                .iter()
                .filter(|&&n| group.pool.contains(n))
                .count() as u32;
            if !group.count.contains(hits) {
                return false;
            }
        }
        if self.custom.is_active() {
            let hits = combo
                .numbers()
                .iter()
                .filter(|&&n| self.custom.merged.contains(n))
                .count() as u32;
            if !self.custom.count.contains(hits) {
                return false;
            }
        }

        match self.runs {
            Some(rule) => rule.allows(combo.numbers()),
            None => true,
        }
    }
}
