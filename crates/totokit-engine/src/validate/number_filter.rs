//! Include and exclude filtering, the first axis of the pipeline.
//!
//! Includes move numbers out of the available pool into the
//! must-include pool; excludes simply drop them. Everything downstream
//! works against the shrunken available pool plus the must-include
//! tallies.

use totokit_core::{DrawRequest, Field, Pool, RuleViolation, UniverseInfo};

use super::parse_number_list;

/// What include filtering leaves behind: the banked numbers and how
/// many slots the draw still has to fill.
pub(crate) struct FilterOutcome {
    pub must_include: Pool,
    pub required_total: u32,
}

pub(crate) fn apply_includes(
    req: &DrawRequest,
    info: &UniverseInfo,
    available: &mut Pool,
) -> Result<FilterOutcome, RuleViolation> {
    let mut must_include = Pool::new(info.groups);

    if !req.must_includes.trim().is_empty() {
        parse_number_list(&req.must_includes, info, |n| {
            // Duplicates in the list are harmless.
            if !must_include.contains(n) {
                must_include.insert(n, info.low);
                available.remove(n);
            }
            Ok(())
        })
        .map_err(|reason| RuleViolation::new(Field::MustIncludes, reason))?;

        if must_include.len() as u32 > req.system {
            return Err(RuleViolation::new(
                Field::MustIncludes,
                format!("You can only include up to {} numbers.", req.system),
            ));
        }
    }

    let required_total = req.system - must_include.len() as u32;
    Ok(FilterOutcome {
        must_include,
        required_total,
    })
}

pub(crate) fn apply_excludes(
    req: &DrawRequest,
    info: &UniverseInfo,
    available: &mut Pool,
    must_include: &Pool,
) -> Result<(), RuleViolation> {
    if req.must_excludes.trim().is_empty() {
        return Ok(());
    }

    parse_number_list(&req.must_excludes, info, |n| {
        if must_include.contains(n) {
            return Err(format!(
                "Number {n} cannot be in both include and exclude lists."
            ));
        }
        available.remove(n);
        Ok(())
    })
    .map_err(|reason| RuleViolation::new(Field::MustExcludes, reason))?;

    if available.len() + must_include.len() < req.system as usize {
        let max_excludes = info.size() - req.system;
        return Err(RuleViolation::new(
            Field::MustExcludes,
            format!("You can only exclude up to {max_excludes} numbers."),
        ));
    }
    Ok(())
}
