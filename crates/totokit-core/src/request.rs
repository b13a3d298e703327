//! The draw-request input surface.
//!
//! A [`DrawRequest`] mirrors the form a caller fills in: string-typed
//! count specs (see [`crate::count_spec`]) and comma-separated number
//! lists, where empty strings mean unconstrained. Requests can be
//! built in code or loaded from TOML:
//!
//! ```
//! use totokit_core::DrawRequest;
//!
//! let req = DrawRequest::from_toml_str(r#"
//!     universe = "forty_nine"
//!     system = 6
//!     count = 5
//!     must_includes = "1,2"
//!     odd = "2-4"
//! "#).unwrap();
//! assert_eq!(req.system, 6);
//! assert_eq!(req.must_excludes, "");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::universe::Universe;

/// Error loading or parsing a request file.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// One user-defined custom group: a number list plus a count spec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomGroupSpec {
    pub numbers: String,
    #[serde(default)]
    pub count: String,
}

/// The full request surface consumed by the validation pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub universe: Universe,
    /// Numbers per combination.
    pub system: u32,
    /// How many combinations to generate.
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub must_includes: String,
    #[serde(default)]
    pub must_excludes: String,
    #[serde(default)]
    pub odd: String,
    #[serde(default)]
    pub even: String,
    #[serde(default)]
    pub low: String,
    #[serde(default)]
    pub high: String,
    /// One count spec per decade bucket; missing trailing entries are
    /// unconstrained.
    #[serde(default)]
    pub decade_counts: Vec<String>,
    /// Longest allowed run of consecutive numbers.
    #[serde(default)]
    pub max_run_length: String,
    /// Most allowed runs (of length two or more).
    #[serde(default)]
    pub max_run_count: String,
    /// Seed for reproducible generation.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Disjoint user-defined groups, each with its own count interval.
    /// Kept last so TOML serialization emits the array of tables after
    /// all plain values.
    #[serde(default)]
    pub custom_groups: Vec<CustomGroupSpec>,
}

fn default_count() -> u32 {
    1
}

impl DrawRequest {
    /// An unconstrained request for the given universe and system size.
    pub fn new(universe: Universe, system: u32) -> Self {
        DrawRequest {
            universe,
            system,
            count: 1,
            must_includes: String::new(),
            must_excludes: String::new(),
            odd: String::new(),
            even: String::new(),
            low: String::new(),
            high: String::new(),
            decade_counts: Vec::new(),
            max_run_length: String::new(),
            max_run_count: String::new(),
            random_seed: None,
            custom_groups: Vec::new(),
        }
    }

    /// Parses a request from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RequestError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a request from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RequestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
