//! Odd/even validation.
//!
//! The two intervals must jointly cover the system size; they are then
//! narrowed against each other and checked against the must-include
//! tallies, the available pool, and the custom aggregate's best and
//! worst case contributions.

use totokit_core::{
    narrow_complements, CountRange, DrawRequest, Field, NarrowOutcome, Pool,
    RuleViolation,
};

use crate::plan::CustomPlan;

const DISTRIBUTION: &str =
    "Please enter a valid odd/even distribution that matches your system size.";
const CONFLICTS_INCLUDED: &str =
    "Your odd/even setting conflicts with the numbers you've included.";
const AFTER_FILTERS: &str = "Your odd/even setting cannot be satisfied \
     after applying your include and exclude settings.";
const AFTER_CUSTOM: &str = "Your odd/even setting cannot be satisfied \
     after applying your include, exclude, and custom group settings.";

/// The narrowed parity intervals and the counts the draw still owes
/// each parity.
pub(crate) struct ParityOutcome {
    pub odd: CountRange,
    pub even: CountRange,
    pub required_odd: u32,
    pub required_even: u32,
}

/// Picks which of the pair to blame for a bound violation: the field
/// whose spec the user actually wrote and whose bound was not derived
/// by narrowing, falling back to the sibling.
pub(crate) fn blame(
    primary: Field,
    sibling: Field,
    spec_written: bool,
    bound_derived: bool,
) -> Field {
    if spec_written && !bound_derived {
        primary
    } else {
        sibling
    }
}

pub(crate) fn validate_odd_even(
    req: &DrawRequest,
    available: &Pool,
    must_include: &Pool,
    custom: &CustomPlan,
) -> Result<ParityOutcome, RuleViolation> {
    let system = req.system;
    let mut odd = CountRange::parse(&req.odd, 0, system)
        .map_err(|e| RuleViolation::new(Field::Odd, e.to_string()))?;
    let mut even = CountRange::parse(&req.even, 0, system)
        .map_err(|e| RuleViolation::new(Field::Even, e.to_string()))?;

    if odd.min + even.min > system || odd.max + even.max < system {
        return Err(RuleViolation::new(Field::Odd, DISTRIBUTION));
    }
    let narrowed: NarrowOutcome = narrow_complements(&mut odd, &mut even, system);

    let odd_written = !req.odd.trim().is_empty();
    let even_written = !req.even.trim().is_empty();
    let blame_odd_max = blame(Field::Odd, Field::Even, odd_written, narrowed.a_max_lowered);
    let blame_even_max = blame(Field::Even, Field::Odd, even_written, narrowed.b_max_lowered);
    let blame_odd_min = blame(Field::Odd, Field::Even, odd_written, narrowed.a_min_raised);
    let blame_even_min = blame(Field::Even, Field::Odd, even_written, narrowed.b_min_raised);

    let include_odd = must_include.whole.odd.len() as u32;
    let include_even = must_include.whole.even.len() as u32;
    if odd.max < include_odd {
        return Err(RuleViolation::new(blame_odd_max, CONFLICTS_INCLUDED));
    }
    if even.max < include_even {
        return Err(RuleViolation::new(blame_even_max, CONFLICTS_INCLUDED));
    }

    let required_odd = odd.min.saturating_sub(include_odd);
    let required_even = even.min.saturating_sub(include_even);

    let avail_odd = available.whole.odd.len() as u32;
    let avail_even = available.whole.even.len() as u32;
    if required_odd > avail_odd {
        return Err(RuleViolation::new(blame_odd_min, AFTER_FILTERS));
    }
    if required_even > avail_even {
        return Err(RuleViolation::new(blame_even_min, AFTER_FILTERS));
    }

    if custom.is_active() {
        let custom_odd = custom.merged.whole.odd.len() as u32;
        let custom_even = custom.merged.whole.even.len() as u32;

        // Best case: the custom slots all land on the needed parity.
        let best_odd = avail_odd - custom_odd + custom.count.max.min(custom_odd);
        let best_even = avail_even - custom_even + custom.count.max.min(custom_even);
        if required_odd > best_odd {
            return Err(RuleViolation::new(blame_odd_min, AFTER_CUSTOM));
        }
        if required_even > best_even {
            return Err(RuleViolation::new(blame_even_min, AFTER_CUSTOM));
        }

        // Worst case: the mandatory custom picks overflow one parity.
        let forced_odd = custom.count.min.saturating_sub(custom_even);
        let forced_even = custom.count.min.saturating_sub(custom_odd);
        if odd.max - include_odd < forced_odd {
            return Err(RuleViolation::new(blame_odd_max, AFTER_CUSTOM));
        }
        if even.max - include_even < forced_even {
            return Err(RuleViolation::new(blame_even_max, AFTER_CUSTOM));
        }
    }

    Ok(ParityOutcome {
        odd,
        even,
        required_odd,
        required_even,
    })
}
