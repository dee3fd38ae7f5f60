//! RegPass command-line front end
//!
//! Collects a password policy (interactively or from a file), compiles it
//! with `regpass-policy` and prints the resulting grep pipeline.

pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod output;

pub use cli::{Cli, Commands, PolicyArgs};
pub use collector::PolicyCollector;
pub use config::CliConfig;
pub use output::OutputFormat;
