use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "regpass")]
#[command(
    author,
    version,
    about = "Generate grep pipelines that filter wordlists by password policy"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "REGPASS_CONFIG", default_value = "regpass.yaml")]
    pub config: String,

    /// Refuse policies that no password can satisfy
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand; prompts interactively when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a policy by answering prompts and print its pipeline
    Interactive,

    /// Print the grep pipeline for a policy file
    Compile {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Apply a policy in-process to a wordlist and print surviving lines
    Filter {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Wordlist to read (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Report policy settings that no password can satisfy
    Check {
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

/// Where the policy comes from, plus per-field overrides
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Policy file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    /// Override the minimum length
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Override the maximum length (0 = no limit)
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Disallow immediately repeated characters
    #[arg(long)]
    pub no_repeat: bool,
}
