//! Totokit Core - data model for the lottery system-play engine
//!
//! This crate provides the leaf types shared by the validation,
//! generation and enumeration layers:
//! - Universe presets and the process-wide base-pool cache
//! - Partitioned number pools (parity, tier, decade projections)
//! - The count-spec grammar (`""`, `"N"`, `"N-M"`)
//! - Combinations and their derived summary statistics
//! - The draw-request input surface and its TOML loader

pub mod combination;
pub mod count_spec;
pub mod error;
pub mod pool;
pub mod request;
pub mod universe;

#[cfg(test)]
mod count_spec_tests;
#[cfg(test)]
mod pool_tests;
#[cfg(test)]
mod request_tests;

pub use combination::{run_stats, Combination, Summary};
pub use count_spec::{narrow_complements, CountRange, CountSpecError, NarrowOutcome};
pub use error::{Field, RuleViolation};
pub use pool::{decade_of, parity_of, tier_of, FacetSet, NumberSet, Parity, Pool, Tier};
pub use request::{CustomGroupSpec, DrawRequest, RequestError};
pub use universe::{Universe, UniverseInfo};
