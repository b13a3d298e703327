//! The consecutive-number rule.
//!
//! Both specs share the count grammar but only the upper bound is
//! kept: `max_run_length` caps the longest run of consecutive numbers
//! and `max_run_count` caps how many runs of length two or more a
//! combination may contain. Leaving both empty disables the rule.

use totokit_core::{run_stats, CountRange, DrawRequest, Field, Pool, RuleViolation};

use crate::plan::RunRule;

const CONFLICTS_INCLUDED: &str =
    "Your consecutive number setting conflicts with the numbers you've included.";

pub(crate) fn validate_run_rule(
    req: &DrawRequest,
    must_include: &Pool,
) -> Result<Option<RunRule>, RuleViolation> {
    if req.max_run_length.trim().is_empty() && req.max_run_count.trim().is_empty() {
        return Ok(None);
    }

    let length = CountRange::parse(&req.max_run_length, 1, req.system)
        .map_err(|e| RuleViolation::new(Field::MaxRunLength, e.to_string()))?;
    // A system of n numbers fits at most n/2 disjoint runs.
    let count = CountRange::parse(&req.max_run_count, 0, req.system / 2)
        .map_err(|e| RuleViolation::new(Field::MaxRunCount, e.to_string()))?;

    let rule = RunRule {
        max_len: length.max,
        max_runs: count.max,
    };

    let banked: Vec<u8> = must_include.whole.all.iter().collect();
    let (longest, runs) = run_stats(&banked);
    if longest > rule.max_len {
        return Err(RuleViolation::new(Field::MaxRunLength, CONFLICTS_INCLUDED));
    }
    if runs > rule.max_runs {
        return Err(RuleViolation::new(Field::MaxRunCount, CONFLICTS_INCLUDED));
    }

    Ok(Some(rule))
}
