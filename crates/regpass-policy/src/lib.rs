//! RegPass Policy Compiler
//!
//! Translates a declarative password-composition policy into a pipeline of
//! `grep` commands that keeps only the candidate lines satisfying every
//! constraint.
//!
//! Compilation produces an ordered list of [`Stage`]s:
//! - length bounds (anchored whole-line matches)
//! - minimum counts per character class
//! - prohibited characters and adjacent repeats (inverted stages)
//! - required literal sequences
//!
//! Each stage renders to one command; commands are joined with `" | "`.

pub mod compiler;
pub mod escape;
pub mod policy;
pub mod render;
pub mod stage;
pub mod validate;

pub use compiler::{compile, compile_to_string, PolicyCompiler};
pub use escape::{escape_class, escape_literal, escape_pattern};
pub use policy::{Policy, DEFAULT_SPECIAL_CHARS};
pub use render::{Command, Pipeline, PIPE_SEPARATOR};
pub use stage::{CharClass, Polarity, Stage};
pub use validate::{has_immediate_repeat, validate, PolicyIssue, Severity};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::compiler::{compile, PolicyCompiler};
    pub use crate::policy::Policy;
    pub use crate::render::{Command, Pipeline};
    pub use crate::stage::{CharClass, Polarity, Stage};
}
