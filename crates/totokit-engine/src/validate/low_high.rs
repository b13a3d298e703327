//! Low/high validation.
//!
//! Same shape as odd/even, plus the combined parity-tier carries: once
//! both axes demand counts, the pigeonhole residue
//! `required_low + required_odd - required_total` must fit inside the
//! odd-low projection of the pool, and likewise for the other three
//! quadrants.

use totokit_core::{
    narrow_complements, CountRange, DrawRequest, Field, Pool, RuleViolation,
};

use crate::plan::CustomPlan;

use super::odd_even::{blame, ParityOutcome};

const DISTRIBUTION: &str =
    "Please enter a valid low/high distribution that matches your system size.";
const CONFLICTS_INCLUDED: &str =
    "Your low/high setting conflicts with the numbers you've included.";
const AFTER_FILTERS: &str = "Your low/high setting cannot be satisfied \
     after applying your include and exclude settings.";
const AFTER_ODD_EVEN: &str = "Your low/high setting cannot be satisfied \
     after applying your include, exclude, and odd/even settings.";
const AFTER_CUSTOM: &str = "Your low/high setting cannot be satisfied \
     after applying your include, exclude, and custom group settings.";
const AFTER_CUSTOM_ODD_EVEN: &str = "Your low/high setting cannot be satisfied \
     after applying your include, exclude, custom group, and odd/even settings.";

/// The narrowed tier intervals, the single-axis carries and the four
/// signed parity-tier carries.
pub(crate) struct TierOutcome {
    pub low: CountRange,
    pub high: CountRange,
    pub required_low: u32,
    pub required_high: u32,
    pub required_odd_low: i64,
    pub required_odd_high: i64,
    pub required_even_low: i64,
    pub required_even_high: i64,
}

pub(crate) fn validate_low_high(
    req: &DrawRequest,
    required_total: u32,
    available: &Pool,
    must_include: &Pool,
    custom: &CustomPlan,
    parity: &ParityOutcome,
) -> Result<TierOutcome, RuleViolation> {
    let system = req.system;
    let mut low = CountRange::parse(&req.low, 0, system)
        .map_err(|e| RuleViolation::new(Field::Low, e.to_string()))?;
    let mut high = CountRange::parse(&req.high, 0, system)
        .map_err(|e| RuleViolation::new(Field::High, e.to_string()))?;

    if low.min + high.min > system || low.max + high.max < system {
        return Err(RuleViolation::new(Field::Low, DISTRIBUTION));
    }
    let narrowed = narrow_complements(&mut low, &mut high, system);

    let low_written = !req.low.trim().is_empty();
    let high_written = !req.high.trim().is_empty();
    let blame_low_max = blame(Field::Low, Field::High, low_written, narrowed.a_max_lowered);
    let blame_high_max = blame(Field::High, Field::Low, high_written, narrowed.b_max_lowered);
    let blame_low_min = blame(Field::Low, Field::High, low_written, narrowed.a_min_raised);
    let blame_high_min = blame(Field::High, Field::Low, high_written, narrowed.b_min_raised);

    let include_low = must_include.whole.low.len() as u32;
    let include_high = must_include.whole.high.len() as u32;
    if low.max < include_low {
        return Err(RuleViolation::new(blame_low_max, CONFLICTS_INCLUDED));
    }
    if high.max < include_high {
        return Err(RuleViolation::new(blame_high_max, CONFLICTS_INCLUDED));
    }

    let required_low = low.min.saturating_sub(include_low);
    let required_high = high.min.saturating_sub(include_high);

    let avail_low = available.whole.low.len() as u32;
    let avail_high = available.whole.high.len() as u32;
    if required_low > avail_low {
        return Err(RuleViolation::new(blame_low_min, AFTER_FILTERS));
    }
    if required_high > avail_high {
        return Err(RuleViolation::new(blame_high_min, AFTER_FILTERS));
    }

    // Signed carries: how many picks must satisfy both axes at once.
    let total = required_total as i64;
    let required_odd_low = required_low as i64 + parity.required_odd as i64 - total;
    let required_odd_high = required_high as i64 + parity.required_odd as i64 - total;
    let required_even_low = required_low as i64 + parity.required_even as i64 - total;
    let required_even_high = required_high as i64 + parity.required_even as i64 - total;

    let avail_odd_low = available.whole.odd_low.len() as i64;
    let avail_odd_high = available.whole.odd_high.len() as i64;
    let avail_even_low = available.whole.even_low.len() as i64;
    let avail_even_high = available.whole.even_high.len() as i64;

    if required_odd_low > avail_odd_low || required_even_low > avail_even_low {
        return Err(RuleViolation::new(blame_low_min, AFTER_ODD_EVEN));
    }
    if required_odd_high > avail_odd_high || required_even_high > avail_even_high {
        return Err(RuleViolation::new(blame_high_min, AFTER_ODD_EVEN));
    }

    if custom.is_active() {
        let c = &custom.merged.whole;
        let c_low = c.low.len() as u32;
        let c_high = c.high.len() as u32;
        let cmin = custom.count.min;
        let cmax = custom.count.max;

        let best_low = avail_low - c_low + cmax.min(c_low);
        let best_high = avail_high - c_high + cmax.min(c_high);
        if required_low > best_low {
            return Err(RuleViolation::new(blame_low_min, AFTER_CUSTOM));
        }
        if required_high > best_high {
            return Err(RuleViolation::new(blame_high_min, AFTER_CUSTOM));
        }

        let best_quadrant = |avail: i64, custom_size: usize| -> i64 {
            let custom_size = custom_size as i64;
            avail - custom_size + (cmax as i64).min(custom_size)
        };
        if required_odd_low > best_quadrant(avail_odd_low, c.odd_low.len())
            || required_even_low > best_quadrant(avail_even_low, c.even_low.len())
        {
            return Err(RuleViolation::new(blame_low_min, AFTER_CUSTOM_ODD_EVEN));
        }
        if required_odd_high > best_quadrant(avail_odd_high, c.odd_high.len())
            || required_even_high > best_quadrant(avail_even_high, c.even_high.len())
        {
            return Err(RuleViolation::new(blame_high_min, AFTER_CUSTOM_ODD_EVEN));
        }

        let forced_low = cmin.saturating_sub(c_high);
        let forced_high = cmin.saturating_sub(c_low);
        if low.max - include_low < forced_low {
            return Err(RuleViolation::new(blame_low_max, AFTER_CUSTOM));
        }
        if high.max - include_high < forced_high {
            return Err(RuleViolation::new(blame_high_max, AFTER_CUSTOM));
        }

        // Picks that may dodge the custom pool entirely.
        let skip = (required_total - cmin) as i64;
        let forced_in_custom = |required: i64, custom_size: usize| -> bool {
            (required - skip).max(0) > custom_size as i64
        };
        if forced_in_custom(required_odd_low, c.odd_low.len())
            || forced_in_custom(required_even_low, c.even_low.len())
        {
            return Err(RuleViolation::new(blame_low_min, AFTER_CUSTOM_ODD_EVEN));
        }
        if forced_in_custom(required_odd_high, c.odd_high.len())
            || forced_in_custom(required_even_high, c.even_high.len())
        {
            return Err(RuleViolation::new(blame_high_min, AFTER_CUSTOM_ODD_EVEN));
        }
    }

    Ok(TierOutcome {
        low,
        high,
        required_low,
        required_high,
        required_odd_low,
        required_odd_high,
        required_even_low,
        required_even_high,
    })
}
