//! The validation pipeline.
//!
//! Axes run in a fixed order, each consuming the narrowed state of the
//! ones before it: count and system bounds, include/exclude filtering,
//! custom groups, odd/even, low/high, decade range groups, and finally
//! the consecutive-number rule. The pipeline is fail-fast: the first
//! violation is returned with the blamed input field.

mod custom_group;
mod low_high;
mod number_filter;
mod odd_even;
mod range_group;
mod runs;


use tracing::debug;

use totokit_core::{DrawRequest, Field, RuleViolation, UniverseInfo};

use crate::plan::{Plan, RequiredCounts};

/// Most combinations a single batch may request.
pub const MAX_BATCH: u32 = 100;

/// Runs the full pipeline over a request, producing a [`Plan`] or the
/// first violation encountered.
pub fn validate(req: &DrawRequest) -> Result<Plan, RuleViolation> {
    let info = req.universe.info();

    if req.count < 1 || req.count > MAX_BATCH {
        return Err(RuleViolation::new(
            Field::Count,
            format!("You can generate between 1 and {MAX_BATCH} combinations only."),
        ));
    }
    if req.system < 1 || req.system > info.size() {
        return Err(RuleViolation::new(
            Field::System,
            format!(
                "Please choose a system size between 1 and {}.",
                info.size()
            ),
        ));
    }

    let mut available = req.universe.fresh_pool();
    let filtered = number_filter::apply_includes(req, &info, &mut available)?;
    number_filter::apply_excludes(req, &info, &mut available, &filtered.must_include)?;

    let custom = custom_group::validate_custom_groups(
        &req.custom_groups,
        &info,
        req.system,
        &available,
        filtered.required_total,
    )?;

    let parity = odd_even::validate_odd_even(
        req,
        &available,
        &filtered.must_include,
        &custom,
    )?;
    let tier = low_high::validate_low_high(
        req,
        filtered.required_total,
        &available,
        &filtered.must_include,
        &custom,
        &parity,
    )?;
    let decades = range_group::validate_range_groups(
        req,
        &info,
        &available,
        &filtered.must_include,
        &custom,
        &parity,
        &tier,
    )?;
    let runs = runs::validate_run_rule(req, &filtered.must_include)?;

    let required = RequiredCounts {
        total: filtered.required_total,
        odd: parity.required_odd,
        even: parity.required_even,
        low: tier.required_low,
        high: tier.required_high,
        odd_low: tier.required_odd_low,
        odd_high: tier.required_odd_high,
        even_low: tier.required_even_low,
        even_high: tier.required_even_high,
    };

    debug!(
        universe = ?req.universe,
        system = req.system,
        available = available.len(),
        must_include = filtered.must_include.len(),
        custom_groups = custom.groups.len(),
        required_total = required.total,
        "request validated"
    );

    Ok(Plan {
        universe: req.universe,
        info,
        system: req.system,
        count: req.count,
        seed: req.random_seed,
        available,
        must_include: filtered.must_include,
        custom,
        odd: parity.odd,
        even: parity.even,
        low: tier.low,
        high: tier.high,
        decades,
        required,
        runs,
    })
}

/// Walks a comma-separated number list, trimming entries and skipping
/// blanks. Numbers outside the universe fail with a shared message;
/// `visit` can reject a number with its own reason.
pub(crate) fn parse_number_list(
    list: &str,
    info: &UniverseInfo,
    mut visit: impl FnMut(u8) -> Result<(), String>,
) -> Result<(), String> {
    for part in list.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let n: i64 = part.parse().map_err(|_| out_of_range(info))?;
        if n < info.min as i64 || n > info.max as i64 {
            return Err(out_of_range(info));
        }
        visit(n as u8)?;
    }
    Ok(())
}

fn out_of_range(info: &UniverseInfo) -> String {
    format!("Please enter values between {} and {}.", info.min, info.max)
}
