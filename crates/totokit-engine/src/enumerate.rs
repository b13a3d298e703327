//! Exhaustive enumeration.
//!
//! Counts every combination a plan admits by backtracking over the
//! candidate numbers in ascending order. Interval maxima, group maxima
//! and the run rule prune branches as soon as they are exceeded;
//! minima are checked once a combination is complete. The top-level
//! branches (choice of the first taken number) fan out across the
//! rayon pool, and [`spawn_count`] wraps the whole thing in a
//! cancellable worker thread for interactive callers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::{debug, info};

use totokit_core::{decade_of, parity_of, tier_of, CountRange, Parity, Tier};

use crate::plan::{Plan, RunRule};

/// Immutable snapshot of a plan, flattened for the counting loop.
#[derive(Clone)]
pub struct CountInput {
    system: u32,
    candidates: Vec<Candidate>,
    forced_total: u32,
    odd: CountRange,
    even: CountRange,
    low: CountRange,
    high: CountRange,
    decades: SmallVec<[CountRange; 7]>,
    groups: Vec<CountRange>,
    agg: CountRange,
    runs: Option<RunRule>,
}

/// One candidate number with its classifications precomputed.
#[derive(Clone, Copy)]
struct Candidate {
    n: u8,
    /// Must-include numbers are always taken when visited.
    forced: bool,
    odd: bool,
    low: bool,
    decade: u8,
    group: Option<u8>,
}

/// Mutable tallies along one backtracking path.
#[derive(Clone)]
struct Tallies {
    taken: u32,
    odd: u32,
    even: u32,
    low: u32,
    high: u32,
    decades: SmallVec<[u32; 7]>,
    groups: SmallVec<[u32; 4]>,
    custom: u32,
    prev: u8,
    run_len: u32,
    run_count: u32,
    longest: u32,
}

/// Saved run-tracking state, restored on backtrack.
#[derive(Clone, Copy)]
struct RunSnapshot {
    prev: u8,
    run_len: u32,
    run_count: u32,
    longest: u32,
}

impl Tallies {
    fn new(input: &CountInput) -> Tallies {
        Tallies {
            taken: 0,
            odd: 0,
            even: 0,
            low: 0,
            high: 0,
            decades: SmallVec::from_elem(0, input.decades.len()),
            groups: SmallVec::from_elem(0, input.groups.len()),
            custom: 0,
            prev: 0,
            run_len: 0,
            run_count: 0,
            longest: 0,
        }
    }

    fn save_runs(&self) -> RunSnapshot {
        RunSnapshot {
            prev: self.prev,
            run_len: self.run_len,
            run_count: self.run_count,
            longest: self.longest,
        }
    }

    fn apply(&mut self, c: Candidate) {
        self.taken += 1;
        if c.odd {
            self.odd += 1;
        } else {
            self.even += 1;
        }
        if c.low {
            self.low += 1;
        } else {
            self.high += 1;
        }
        self.decades[c.decade as usize] += 1;
        if let Some(g) = c.group {
            self.groups[g as usize] += 1;
            self.custom += 1;
        }

        if self.taken > 1 && c.n == self.prev + 1 {
            self.run_len += 1;
        } else {
            if self.run_len >= 2 {
                self.run_count += 1;
            }
            self.run_len = 1;
        }
        self.prev = c.n;
        self.longest = self.longest.max(self.run_len);
    }

    fn revert(&mut self, c: Candidate, saved: RunSnapshot) {
        self.taken -= 1;
        if c.odd {
            self.odd -= 1;
        } else {
            self.even -= 1;
        }
        if c.low {
            self.low -= 1;
        } else {
            self.high -= 1;
        }
        self.decades[c.decade as usize] -= 1;
        if let Some(g) = c.group {
            self.groups[g as usize] -= 1;
            self.custom -= 1;
        }
        self.prev = saved.prev;
        self.run_len = saved.run_len;
        self.run_count = saved.run_count;
        self.longest = saved.longest;
    }

    /// Completed runs plus the still-open one, if long enough.
    fn runs_so_far(&self) -> u32 {
        self.run_count + u32::from(self.run_len >= 2)
    }
}

impl CountInput {
    /// Flattens a validated plan into a counting snapshot.
    pub fn from_plan(plan: &Plan) -> CountInput {
        let mut candidates = Vec::with_capacity(plan.available.len() + plan.must_include.len());
        for n in plan.info.min..=plan.info.max {
            let forced = plan.must_include.contains(n);
            if !forced && !plan.available.contains(n) {
                continue;
            }
            let group = plan
                .custom
                .groups
                .iter()
                .position(|g| g.pool.contains(n))
                .map(|g| g as u8);
            candidates.push(Candidate {
                n,
                forced,
                odd: parity_of(n) == Parity::Odd,
                low: tier_of(n, plan.info.low) == Tier::Low,
                decade: decade_of(n) as u8,
                group,
            });
        }

        CountInput {
            system: plan.system,
            candidates,
            forced_total: plan.must_include.len() as u32,
            odd: plan.odd,
            even: plan.even,
            low: plan.low,
            high: plan.high,
            decades: plan.decades.clone(),
            groups: plan.custom.groups.iter().map(|g| g.count).collect(),
            agg: plan.custom.count,
            runs: plan.runs,
        }
    }

    /// Counts every satisfying combination.
    pub fn count(&self) -> u64 {
        self.count_inner(None).unwrap_or(0)
    }

    /// Counts unless `cancel` is raised first; a cancelled count
    /// returns `None` rather than a partial total.
    pub fn count_cancellable(&self, cancel: &AtomicBool) -> Option<u64> {
        self.count_inner(Some(cancel))
    }

    fn count_inner(&self, cancel: Option<&AtomicBool>) -> Option<u64> {
        let len = self.candidates.len();
        if (len as u32) < self.system || self.system == 0 {
            return Some(0);
        }

        // The first taken number cannot come after the first forced
        // candidate (it would have to be skipped) and must leave room
        // for the rest of the system.
        let first_forced = self
            .candidates
            .iter()
            .position(|c| c.forced)
            .unwrap_or(len);
        let max_first = (len - self.system as usize).min(first_forced);

        let total: u64 = (0..=max_first)
            .into_par_iter()
            .map(|i| {
                let c = self.candidates[i];
                let mut tallies = Tallies::new(self);
                tallies.apply(c);
                if !self.within_max(&tallies, c) {
                    return 0;
                }
                let forced_left = self.forced_total - u32::from(c.forced);
                self.dfs(i + 1, &mut tallies, forced_left, cancel)
            })
            .sum();

        match cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => None,
            _ => Some(total),
        }
    }

    fn dfs(
        &self,
        i: usize,
        tallies: &mut Tallies,
        forced_left: u32,
        cancel: Option<&AtomicBool>,
    ) -> u64 {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return 0;
            }
        }
        if tallies.taken == self.system {
            return u64::from(forced_left == 0 && self.accept(tallies));
        }
        let needed = (self.system - tallies.taken) as usize;
        if i >= self.candidates.len() || self.candidates.len() - i < needed {
            return 0;
        }

        let c = self.candidates[i];
        let mut total = 0;

        let saved = tallies.save_runs();
        tallies.apply(c);
        if self.within_max(tallies, c) {
            total += self.dfs(i + 1, tallies, forced_left - u32::from(c.forced), cancel);
        }
        tallies.revert(c, saved);

        if !c.forced {
            total += self.dfs(i + 1, tallies, forced_left, cancel);
        }
        total
    }

    /// Upper-bound pruning after taking `c`.
    fn within_max(&self, t: &Tallies, c: Candidate) -> bool {
        if t.odd > self.odd.max
            || t.even > self.even.max
            || t.low > self.low.max
            || t.high > self.high.max
            || t.decades[c.decade as usize] > self.decades[c.decade as usize].max
            || t.custom > self.agg.max
        {
            return false;
        }
        if let Some(g) = c.group {
            if t.groups[g as usize] > self.groups[g as usize].max {
                return false;
            }
        }
        if let Some(rule) = self.runs {
            if t.longest > rule.max_len || t.runs_so_far() > rule.max_runs {
                return false;
            }
        }
        true
    }

    /// Lower-bound checks once the combination is complete.
    fn accept(&self, t: &Tallies) -> bool {
        if t.odd < self.odd.min
            || t.even < self.even.min
            || t.low < self.low.min
            || t.high < self.high.min
            || t.custom < self.agg.min
        {
            return false;
        }
        if t
            .decades
            .iter()
            .zip(self.decades.iter())
            .any(|(&have, want)| have < want.min)
        {
            return false;
        }
        if t
            .groups
            .iter()
            .zip(self.groups.iter())
            .any(|(&have, want)| have < want.min)
        {
            return false;
        }
        true
    }
}

/// Counts every combination the plan admits.
pub fn count_feasible(plan: &Plan) -> u64 {
    let input = CountInput::from_plan(plan);
    let total = input.count();
    info!(total, system = plan.system, "enumeration finished");
    total
}

/// A count running on a detached worker thread.
pub struct CountJob {
    cancel: Arc<AtomicBool>,
    rx: mpsc::Receiver<u64>,
    handle: thread::JoinHandle<()>,
}

/// Starts a count on its own thread and returns a handle that can
/// cancel it or wait for the total.
pub fn spawn_count(plan: &Plan) -> CountJob {
    let input = CountInput::from_plan(plan);
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    let (tx, rx) = mpsc::sync_channel(1);

    let handle = thread::spawn(move || {
        match input.count_cancellable(&flag) {
            Some(total) => {
                // The receiver may already be gone.
                let _ = tx.send(total);
            }
            None => debug!("count cancelled before completion"),
        }
    });

    CountJob { cancel, rx, handle }
}

impl CountJob {
    /// Asks the worker to stop. The flag is checked at every
    /// backtracking step, so cancellation lands quickly.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Waits for the worker; `None` means the count was cancelled.
    pub fn join(self) -> Option<u64> {
        let result = self.rx.recv().ok();
        let _ = self.handle.join();
        result
    }
}
