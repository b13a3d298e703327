//! Biased random generation.
//!
//! Each draw walks the remaining picks one number at a time: pruning
//! candidates that can no longer appear, steering toward the axis with
//! the tightest unmet requirement, then sampling uniformly from the
//! chosen facet. Draws are verified against the full plan before being
//! accepted, so the bias only affects how often a draw is retried, not
//! what a batch can contain.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

use totokit_core::{Combination, FacetSet, NumberSet, Parity, Pool, Tier};

use crate::plan::Plan;
use crate::EngineError;

/// Attempt budget for one batch. Biased draws can dead-end or miss a
/// narrow target, so a batch is a bounded retry loop rather than a
/// guarantee.
const MAX_ATTEMPTS: u32 = 1_000;

/// Generates the plan's batch of combinations, seeding the RNG from
/// the plan when a seed was requested.
pub fn generate(plan: &Plan) -> Result<Vec<Combination>, EngineError> {
    match plan.seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            generate_with_rng(plan, &mut rng)
        }
        None => {
            let mut rng = StdRng::from_os_rng();
            generate_with_rng(plan, &mut rng)
        }
    }
}

/// Generates a batch with a caller-supplied RNG.
///
/// Combinations within one batch are distinct; the batch may come up
/// short when the constraints admit fewer satisfying combinations than
/// requested or the attempt budget runs out.
pub fn generate_with_rng<R: Rng>(
    plan: &Plan,
    rng: &mut R,
) -> Result<Vec<Combination>, EngineError> {
    let want = plan.count as usize;

    // Must-includes alone fill the system: one combination exists.
    if plan.required.total == 0 {
        let numbers: Vec<u8> = plan.must_include.whole.all.iter().collect();
        info!(produced = 1, "generation finished");
        return Ok(vec![Combination::new(numbers)]);
    }

    let mut out = Vec::with_capacity(want);
    let mut seen: HashSet<Combination> = HashSet::with_capacity(want);
    let mut attempts = 0u32;
    let mut dead_ends = 0u32;

    while out.len() < want && attempts < MAX_ATTEMPTS {
        attempts += 1;
        let Some(combo) = draw_one(plan, rng)? else {
            dead_ends += 1;
            continue;
        };
        if !plan.satisfies(&combo) {
            continue;
        }
        if seen.insert(combo.clone()) {
            out.push(combo);
        }
    }

    if out.len() < want {
        warn!(
            requested = want,
            produced = out.len(),
            attempts,
            "attempt budget exhausted before filling the batch"
        );
    }
    info!(produced = out.len(), attempts, dead_ends, "generation finished");
    Ok(out)
}

/// Mutable per-draw snapshot of the plan's pools and tallies.
struct DrawState {
    available: Pool,
    selected: Pool,
    merged: Pool,
    group_pools: Vec<Pool>,
    group_picked: Vec<u32>,
    custom_picked: u32,
}

/// One complete biased draw. `Ok(None)` means the heuristic painted
/// itself into a corner; the caller retries with fresh randomness.
fn draw_one<R: Rng>(plan: &Plan, rng: &mut R) -> Result<Option<Combination>, EngineError> {
    let mut st = DrawState {
        available: plan.available.clone(),
        selected: plan.must_include.clone(),
        merged: plan.custom.merged.clone(),
        group_pools: plan.custom.groups.iter().map(|g| g.pool.clone()).collect(),
        group_picked: vec![0; plan.custom.groups.len()],
        custom_picked: 0,
    };

    for _ in 0..plan.required.total {
        match pick_next(plan, &mut st, rng)? {
            Some(n) => apply_pick(plan, &mut st, n),
            None => return Ok(None),
        }
    }
    Ok(Some(Combination::new(
        st.selected.whole.all.iter().collect(),
    )))
}

fn pick_next<R: Rng>(
    plan: &Plan,
    st: &mut DrawState,
    rng: &mut R,
) -> Result<Option<u8>, EngineError> {
    prune(plan, st);

    if st.available.is_empty() {
        // Validation proved the pool can fill every slot; an empty pool
        // mid-draw means the engine's bookkeeping is wrong.
        error!(
            selected = st.selected.len(),
            system = plan.system,
            "available pool emptied before the combination was complete"
        );
        return Err(EngineError::Contract(
            "the available pool emptied before the combination was complete".into(),
        ));
    }

    let sel = &st.selected.whole;
    let remaining_odd = plan.odd.max.saturating_sub(sel.odd.len() as u32);
    let remaining_even = plan.even.max.saturating_sub(sel.even.len() as u32);
    let remaining_low = plan.low.max.saturating_sub(sel.low.len() as u32);
    let remaining_high = plan.high.max.saturating_sub(sel.high.len() as u32);
    let required_odd = plan.odd.min.saturating_sub(sel.odd.len() as u32);
    let required_even = plan.even.min.saturating_sub(sel.even.len() as u32);
    let required_low = plan.low.min.saturating_sub(sel.low.len() as u32);
    let required_high = plan.high.min.saturating_sub(sel.high.len() as u32);

    let (total_odd, total_even, total_low, total_high) = capped_totals(plan, st);

    // Custom groups still owing picks take priority as the base pool;
    // the most constrained owing group goes first.
    let agg_required = plan.custom.count.min.saturating_sub(st.custom_picked);
    let base: &Pool = if agg_required > 0 && !st.merged.is_empty() {
        let owing = (0..st.group_pools.len())
            .filter(|&g| {
                let need =
                    plan.custom.groups[g].count.min.saturating_sub(st.group_picked[g]);
                need > 0 && !st.group_pools[g].is_empty()
            })
            .min_by_key(|&g| {
                let need =
                    plan.custom.groups[g].count.min.saturating_sub(st.group_picked[g]);
                st.group_pools[g].len().saturating_sub(need as usize)
            });
        match owing {
            Some(g) => &st.group_pools[g],
            None => &st.merged,
        }
    } else {
        &st.available
    };

    // Then the most constrained decade that still owes picks.
    let decade = (0..plan.info.groups)
        .filter(|&idx| {
            let selected_d = st.selected.decade(idx).all.len() as u32;
            plan.decades[idx].min > selected_d && !base.decade(idx).all.is_empty()
        })
        .min_by_key(|&idx| {
            let selected_d = st.selected.decade(idx).all.len() as u32;
            let need = plan.decades[idx].min - selected_d;
            base.decade(idx).all.len().saturating_sub(need as usize)
        });

    let facet_ctx: &FacetSet = match decade {
        Some(idx) => base.decade(idx),
        None => &base.whole,
    };
    let ctx_cap = match decade {
        Some(idx) => {
            plan.decades[idx].max
                .saturating_sub(st.selected.decade(idx).all.len() as u32)
        }
        None => u32::MAX,
    };
    let ctx_odd = ctx_cap.min(facet_ctx.odd.len() as u32).min(total_odd);
    let ctx_even = ctx_cap.min(facet_ctx.even.len() as u32).min(total_even);
    let ctx_low = ctx_cap.min(facet_ctx.low.len() as u32).min(total_low);
    let ctx_high = ctx_cap.min(facet_ctx.high.len() as u32).min(total_high);

    // Steer toward a parity when the other one is exhausted, absent
    // from this context, or when the picks outside this context cannot
    // cover the remaining requirement.
    let need_odd_here = required_odd > total_odd - ctx_odd;
    let need_even_here = required_even > total_even - ctx_even;
    let parity = if remaining_even == 0 || ctx_even == 0 || need_odd_here {
        Some(Parity::Odd)
    } else if remaining_odd == 0 || ctx_odd == 0 || need_even_here {
        Some(Parity::Even)
    } else {
        None
    };

    let need_low_here = required_low > total_low - ctx_low;
    let need_high_here = required_high > total_high - ctx_high;
    let tier = if remaining_high == 0 || ctx_high == 0 || need_low_here {
        Some(Tier::Low)
    } else if remaining_low == 0 || ctx_low == 0 || need_high_here {
        Some(Tier::High)
    } else {
        None
    };

    let facet = facet_ctx.projection(parity, tier);
    if facet.is_empty() {
        debug!(?parity, ?tier, ?decade, "biased draw dead-ended on an empty facet");
        return Ok(None);
    }
    let k = rng.random_range(0..facet.len());
    match facet.nth_member(k) {
        Some(n) => Ok(Some(n)),
        None => Err(EngineError::Contract(
            "drawn facet index was out of range".into(),
        )),
    }
}

/// Removes candidates that can no longer legally appear: members of a
/// custom group or decade that already hit its maximum, and numbers of
/// a parity or tier whose interval is full.
fn prune(plan: &Plan, st: &mut DrawState) {
    for g in 0..st.group_pools.len() {
        if st.custom_picked >= plan.custom.count.max
            || st.group_picked[g] >= plan.custom.groups[g].count.max
        {
            let dead = st.group_pools[g].whole.all;
            remove_set(st, dead);
        }
    }
    if st.custom_picked >= plan.custom.count.max {
        let dead = st.merged.whole.all;
        remove_set(st, dead);
    }

    for idx in 0..plan.info.groups {
        let selected_d = st.selected.decade(idx).all.len() as u32;
        if selected_d >= plan.decades[idx].max {
            let dead = st.available.decade(idx).all;
            remove_set(st, dead);
        }
    }

    let sel = &st.selected.whole;
    let (odd_full, even_full) = (
        sel.odd.len() as u32 >= plan.odd.max,
        sel.even.len() as u32 >= plan.even.max,
    );
    let (low_full, high_full) = (
        sel.low.len() as u32 >= plan.low.max,
        sel.high.len() as u32 >= plan.high.max,
    );
    if odd_full {
        let dead = st.available.whole.odd;
        remove_set(st, dead);
    }
    if even_full {
        let dead = st.available.whole.even;
        remove_set(st, dead);
    }
    if low_full {
        let dead = st.available.whole.low;
        remove_set(st, dead);
    }
    if high_full {
        let dead = st.available.whole.high;
        remove_set(st, dead);
    }
}

fn remove_set(st: &mut DrawState, set: NumberSet) {
    for n in set.iter() {
        remove_everywhere(st, n);
    }
}

fn remove_everywhere(st: &mut DrawState, n: u8) {
    st.available.remove(n);
    st.merged.remove(n);
    for pool in &mut st.group_pools {
        pool.remove(n);
    }
}

fn apply_pick(plan: &Plan, st: &mut DrawState, n: u8) {
    if st.merged.contains(n) {
        st.custom_picked += 1;
        for g in 0..st.group_pools.len() {
            if st.group_pools[g].contains(n) {
                st.group_picked[g] += 1;
                break;
            }
        }
    }
    remove_everywhere(st, n);
    st.selected.insert(n, plan.info.low);
}

/// Projection sizes of the available pool summed across decades, each
/// capped by that decade's remaining capacity.
fn capped_totals(plan: &Plan, st: &DrawState) -> (u32, u32, u32, u32) {
    let mut odd = 0u32;
    let mut even = 0u32;
    let mut low = 0u32;
    let mut high = 0u32;
    for idx in 0..plan.info.groups {
        let cap = plan.decades[idx].max
            .saturating_sub(st.selected.decade(idx).all.len() as u32);
        let d = st.available.decade(idx);
        odd += cap.min(d.odd.len() as u32);
        even += cap.min(d.even.len() as u32);
        low += cap.min(d.low.len() as u32);
        high += cap.min(d.high.len() as u32);
    }
    (odd, even, low, high)
}
