//! Custom-group validation.
//!
//! Groups are validated in declaration order. Each group's numbers must
//! be free: inside the available pool and outside every earlier group.
//! Each group's count interval is clamped to its own size and to the
//! slots not already promised to earlier groups, then the groups are
//! merged into one aggregate pool with an aggregate interval that the
//! parity, tier and decade validators consume.

use totokit_core::{
    CountRange, CustomGroupSpec, Field, Pool, RuleViolation, UniverseInfo,
};

use crate::plan::{CustomPlan, GroupPlan};

use super::parse_number_list;

pub(crate) fn validate_custom_groups(
    specs: &[CustomGroupSpec],
    info: &UniverseInfo,
    system: u32,
    available: &Pool,
    required_total: u32,
) -> Result<CustomPlan, RuleViolation> {
    let mut plan = CustomPlan::empty(info.groups);
    if specs.is_empty() {
        return Ok(plan);
    }

    let mut committed_min = 0u32;
    for (idx, spec) in specs.iter().enumerate() {
        let mut pool = Pool::new(info.groups);
        parse_number_list(&spec.numbers, info, |n| {
            if pool.contains(n) {
                return Ok(());
            }
            if !available.contains(n) || plan.merged.contains(n) {
                return Err(format!(
                    "Number {n} in the custom group cannot be in either \
                     the include list, exclude list or another custom group."
                ));
            }
            pool.insert(n, info.low);
            plan.merged.insert(n, info.low);
            Ok(())
        })
        .map_err(|reason| RuleViolation::new(Field::CustomNumbers(idx), reason))?;

        let mut count = CountRange::parse(&spec.count, 0, system)
            .map_err(|e| RuleViolation::new(Field::CustomCount(idx), e.to_string()))?;

        let size = pool.len() as u32;
        if count.min > size {
            return Err(RuleViolation::new(
                Field::CustomCount(idx),
                "The custom number count cannot exceed the custom group numbers size.",
            ));
        }
        let slots_left = required_total - committed_min;
        if count.min > slots_left {
            return Err(RuleViolation::new(
                Field::CustomCount(idx),
                "The custom number count cannot exceed the remaining available numbers.",
            ));
        }
        count.max = count.max.min(size).min(slots_left);
        committed_min += count.min;
        plan.groups.push(GroupPlan { pool, count });
    }

    // Numbers outside every group plus the groups' maxima must still be
    // able to fill the remaining slots.
    let outside = (available.len() - plan.merged.len()) as u32;
    let sum_max: u32 = plan.groups.iter().map(|g| g.count.max).sum();
    if outside + sum_max < required_total {
        return Err(RuleViolation::new(
            Field::CustomCount(specs.len() - 1),
            "Not enough remaining numbers to complete a combination \
             with the selected custom group count.",
        ));
    }

    plan.count = CountRange::new(
        committed_min.max(required_total.saturating_sub(outside)),
        sum_max.min(required_total),
    );
    Ok(plan)
}
