//! RegPass Filter
//!
//! Applies a compiled password-policy pipeline to candidate lines without
//! shelling out to `grep`. Useful for previewing what a policy keeps from a
//! wordlist. Results match the rendered commands except for backslashes,
//! which grep's bracket expressions treat as literal members of a class.
//!
//! Matching is delegated to:
//! - character counting for length bounds and class counts
//! - `regex` bracket expressions for prohibited characters
//! - `aho-corasick` for required literal sequences

pub mod matcher;
pub mod pipeline;

pub use matcher::{matcher_for, LineMatcher};
pub use pipeline::{FilterStage, FilterStats, PipelineFilter, Verdict};

use regpass_core::Result;
use regpass_policy::Policy;

/// Compile `policy` and build its filter in one step
pub fn filter_for_policy(policy: &Policy) -> Result<PipelineFilter> {
    PipelineFilter::new(&regpass_policy::compile(policy))
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::filter_for_policy;
    pub use crate::matcher::LineMatcher;
    pub use crate::pipeline::{PipelineFilter, Verdict};
}
