//! Decade range-group validation.
//!
//! One count interval per decade bucket. The intervals must jointly
//! cover the system size, get narrowed against each other, and are
//! checked per decade against includes, the available pool and the
//! custom aggregate. Finally the decade-capped projections are summed
//! and compared against the parity and tier carries, so a range-group
//! setting cannot silently starve an earlier axis.

use smallvec::SmallVec;

use totokit_core::{
    CountRange, DrawRequest, FacetSet, Field, Pool, RuleViolation, UniverseInfo,
};

use crate::plan::CustomPlan;

use super::low_high::TierOutcome;
use super::odd_even::ParityOutcome;

const DISTRIBUTION: &str =
    "Please enter a valid range group distribution that matches your system size.";
const CONFLICTS_INCLUDED: &str =
    "Your range group setting conflicts with the numbers you've included.";
const AFTER_FILTERS: &str = "Your range group setting cannot be satisfied \
     after applying your include and exclude settings.";
const POOL_TOO_SMALL: &str =
    "The remaining pool size is not enough for your range group settings.";
const AFTER_CUSTOM_FILTERED: &str = "Your range group setting cannot be satisfied \
     after applying your include, exclude, and custom group settings.";
const AFTER_CUSTOM: &str = "Your range group setting cannot be satisfied \
     after applying your custom group settings.";
const AFTER_PARITY: &str =
    "Your range group setting cannot be satisfied after applying odd/even settings.";
const AFTER_TIER: &str =
    "Your range group setting cannot be satisfied after applying low/high settings.";
const AFTER_PARITY_TIER: &str = "Your range group setting cannot be satisfied \
     after applying odd/even and low/high settings.";

/// Projection sizes summed across decades, each capped by that
/// decade's narrowed maximum.
#[derive(Default)]
struct CappedTotals {
    odd: i64,
    even: i64,
    low: i64,
    high: i64,
    odd_low: i64,
    odd_high: i64,
    even_low: i64,
    even_high: i64,
}

pub(crate) fn validate_range_groups(
    req: &DrawRequest,
    info: &UniverseInfo,
    available: &Pool,
    must_include: &Pool,
    custom: &CustomPlan,
    parity: &ParityOutcome,
    tier: &TierOutcome,
) -> Result<SmallVec<[CountRange; 7]>, RuleViolation> {
    let system = req.system;
    let groups = info.groups;

    for (idx, spec) in req.decade_counts.iter().enumerate() {
        if idx >= groups && !spec.trim().is_empty() {
            return Err(RuleViolation::new(
                Field::Decade(idx),
                format!("This universe has {groups} decade groups only."),
            ));
        }
    }

    let mut written: SmallVec<[bool; 7]> = SmallVec::new();
    let mut ranges: SmallVec<[CountRange; 7]> = SmallVec::new();
    for idx in 0..groups {
        let spec = req
            .decade_counts
            .get(idx)
            .map(String::as_str)
            .unwrap_or("");
        written.push(!spec.trim().is_empty());
        let range = CountRange::parse(spec, 0, system)
            .map_err(|e| RuleViolation::new(Field::Decade(idx), e.to_string()))?;
        ranges.push(range);
    }

    let blame = |idx: usize| -> Field {
        if written[idx] {
            Field::Decade(idx)
        } else {
            match written.iter().position(|&w| w) {
                Some(j) => Field::Decade(j),
                None => Field::Decade(0),
            }
        }
    };
    let first_written = blame(0);

    let min_sum: u32 = ranges.iter().map(|r| r.min).sum();
    let max_sum: u32 = ranges.iter().map(|r| r.max).sum();
    if min_sum > system || max_sum < system {
        return Err(RuleViolation::new(first_written, DISTRIBUTION));
    }

    // Narrow each decade against the combined slack of the others.
    let parsed = ranges.clone();
    for idx in 0..groups {
        let v = parsed[idx];
        let others_min = min_sum - v.min;
        let others_max = max_sum - v.max;
        let min_outside = system.saturating_sub(v.max).max(others_min);
        let max_outside = (system - v.min).min(others_max);
        ranges[idx] = CountRange::new(
            v.min.max(system.saturating_sub(max_outside)),
            v.max.min(system - min_outside),
        );
    }

    let filtered = available.len() < info.size() as usize;
    let active = custom.is_active();
    let cmin = custom.count.min;
    let cmax = custom.count.max;
    let merged_total = custom.merged.len() as u32;

    let mut totals = CappedTotals::default();
    for idx in 0..groups {
        let v = ranges[idx];
        let must_d = must_include.decade(idx).all.len() as u32;
        if v.max < must_d {
            return Err(RuleViolation::new(blame(idx), CONFLICTS_INCLUDED));
        }

        let required_d = v.min.saturating_sub(must_d);
        let avail = available.decade(idx);
        let avail_d = avail.all.len() as u32;
        if required_d > avail_d {
            let msg = if filtered { AFTER_FILTERS } else { POOL_TOO_SMALL };
            return Err(RuleViolation::new(blame(idx), msg));
        }

        if active {
            let merged = custom.merged.decade(idx);
            let custom_d = merged.all.len() as u32;

            let best_d = avail_d - custom_d + cmax.min(custom_d);
            if required_d > best_d {
                let msg = if filtered { AFTER_CUSTOM_FILTERED } else { AFTER_CUSTOM };
                return Err(RuleViolation::new(blame(idx), msg));
            }
            // Mandatory custom picks that cannot land outside this decade.
            let forced_d = cmin.saturating_sub(merged_total - custom_d);
            if v.max - must_d < forced_d {
                let msg = if filtered { AFTER_CUSTOM_FILTERED } else { AFTER_CUSTOM };
                return Err(RuleViolation::new(blame(idx), msg));
            }

            accumulate_custom(&mut totals, v.max, avail, merged, cmax);
        } else {
            accumulate(&mut totals, v.max, avail);
        }
    }

    if (parity.required_odd as i64) > totals.odd || (parity.required_even as i64) > totals.even
    {
        return Err(RuleViolation::new(first_written, AFTER_PARITY));
    }
    if (tier.required_low as i64) > totals.low || (tier.required_high as i64) > totals.high {
        return Err(RuleViolation::new(first_written, AFTER_TIER));
    }
    if tier.required_odd_low > totals.odd_low
        || tier.required_odd_high > totals.odd_high
        || tier.required_even_low > totals.even_low
        || tier.required_even_high > totals.even_high
    {
        return Err(RuleViolation::new(first_written, AFTER_PARITY_TIER));
    }

    Ok(ranges)
}

fn accumulate(totals: &mut CappedTotals, cap: u32, avail: &FacetSet) {
    let capped = |proj: usize| -> i64 { cap.min(proj as u32) as i64 };
    totals.odd += capped(avail.odd.len());
    totals.even += capped(avail.even.len());
    totals.low += capped(avail.low.len());
    totals.high += capped(avail.high.len());
    totals.odd_low += capped(avail.odd_low.len());
    totals.odd_high += capped(avail.odd_high.len());
    totals.even_low += capped(avail.even_low.len());
    totals.even_high += capped(avail.even_high.len());
}

fn accumulate_custom(
    totals: &mut CappedTotals,
    cap: u32,
    avail: &FacetSet,
    merged: &FacetSet,
    custom_max: u32,
) {
    let capped = |proj: usize, custom_proj: usize| -> i64 {
        let a = proj as u32;
        let c = custom_proj as u32;
        cap.min(a - c + custom_max.min(c)) as i64
    };
    totals.odd += capped(avail.odd.len(), merged.odd.len());
    totals.even += capped(avail.even.len(), merged.even.len());
    totals.low += capped(avail.low.len(), merged.low.len());
    totals.high += capped(avail.high.len(), merged.high.len());
    totals.odd_low += capped(avail.odd_low.len(), merged.odd_low.len());
    totals.odd_high += capped(avail.odd_high.len(), merged.odd_high.len());
    totals.even_low += capped(avail.even_low.len(), merged.even_low.len());
    totals.even_high += capped(avail.even_high.len(), merged.even_high.len());
}
