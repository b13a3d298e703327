//! The count-spec grammar shared by every constraint axis.
//!
//! An empty string is unconstrained, `"N"` is the exact count `N` and
//! `"N-M"` is the inclusive range `[N, M]`.

use serde::Serialize;
use thiserror::Error;

/// Error for a malformed or out-of-bounds count spec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Please enter a valid number or range value.")]
pub struct CountSpecError;

/// A closed interval over a count of numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub fn new(min: u32, max: u32) -> Self {
        CountRange { min, max }
    }

    /// Parses a count spec. An empty spec yields `[default_min, limit]`;
    /// parsed bounds must satisfy `default_min <= min <= max <= limit`.
    pub fn parse(spec: &str, default_min: u32, limit: u32) -> Result<CountRange, CountSpecError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(CountRange::new(default_min, limit));
        }

        let mut parts = spec.splitn(2, '-');
        let min: u32 = parts
            .next()
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(|_| CountSpecError)?;
        let max: u32 = match parts.next() {
            Some(p) => p.trim().parse().map_err(|_| CountSpecError)?,
            None => min,
        };

        if min < default_min || min > max || max > limit {
            return Err(CountSpecError);
        }
        Ok(CountRange::new(min, max))
    }

    pub fn contains(&self, v: u32) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Which bounds [`narrow_complements`] tightened; the validators use
/// this to blame the user-supplied field rather than an auto-narrowed
/// one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NarrowOutcome {
    pub a_min_raised: bool,
    pub a_max_lowered: bool,
    pub b_min_raised: bool,
    pub b_max_lowered: bool,
}

/// Tightens two complementary intervals whose counts must sum to
/// `total`: `a.min = max(a.min, total - b.max)` and the three
/// symmetric forms, applied sequentially so the second pair sees the
/// first pair's updates.
///
/// Callers must have checked `a.min + b.min <= total <= a.max + b.max`
/// first; narrowing a satisfiable pair never empties either interval.
pub fn narrow_complements(a: &mut CountRange, b: &mut CountRange, total: u32) -> NarrowOutcome {
    let mut out = NarrowOutcome::default();

    if total as i64 - b.max as i64 > a.min as i64 {
        a.min = total - b.max;
        out.a_min_raised = true;
    }
    if (total - b.min) < a.max {
        a.max = total - b.min;
        out.a_max_lowered = true;
    }
    if total as i64 - a.max as i64 > b.min as i64 {
        b.min = total - a.max;
        out.b_min_raised = true;
    }
    if (total - a.min) < b.max {
        b.max = total - a.min;
        out.b_max_lowered = true;
    }

    out
}
