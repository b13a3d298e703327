//! Totokit Engine - the constraint core of the system-play generator.
//!
//! Three operations over a [`totokit_core::DrawRequest`]:
//! - [`validate`] proves the five constraint axes (include/exclude,
//!   custom groups, odd/even, low/high, decade range groups) jointly
//!   satisfiable, producing a [`Plan`] with narrowed intervals and
//!   required-count carries;
//! - [`generate`] turns a plan into concrete combinations by biased
//!   random sampling;
//! - [`enumerate::count_feasible`] counts every satisfying combination
//!   by backtracking, optionally on a detached thread
//!   ([`enumerate::spawn_count`]).

use thiserror::Error;

use totokit_core::RuleViolation;

pub mod enumerate;
pub mod generate;
pub mod plan;
pub mod validate;

#[cfg(test)]
mod enumerate_tests;

pub use enumerate::{count_feasible, spawn_count, CountInput, CountJob};
pub use generate::{generate, generate_with_rng};
pub use plan::{CustomPlan, GroupPlan, Plan, RequiredCounts, RunRule};
pub use validate::validate;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A recoverable validation failure with a blamed input field.
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    /// The generator and validator disagreed about feasibility.
    /// Indicates a defect in the engine, not bad input.
    #[error("Internal error: {0}")]
    Contract(String),
}
