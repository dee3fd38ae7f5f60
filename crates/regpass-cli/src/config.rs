//! CLI configuration

use crate::cli::{Cli, PolicyArgs};
use crate::output::OutputFormat;
use regpass_policy::Policy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Policy used when no policy file is given
    pub defaults: Policy,

    /// Refuse unsatisfiable policies
    pub strict: bool,

    /// Default output format for `compile`
    pub format: OutputFormat,
}

impl CliConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Self = serde_yaml::from_str(&content)?;
            debug!(path = %config_path, "Loaded configuration file");
            config
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if cli.strict {
            config.strict = true;
        }

        Ok(config)
    }

    /// Resolve the policy for a subcommand: file or configured defaults, then flag overrides
    pub fn resolve_policy(&self, args: &PolicyArgs) -> regpass_core::Result<Policy> {
        let mut policy = match &args.policy {
            Some(path) => Policy::from_file(path)?,
            None => self.defaults.clone(),
        };

        if let Some(min) = args.min_length {
            policy.min_length = min;
        }
        if let Some(max) = args.max_length {
            policy.max_length = Some(max);
        }
        if args.no_repeat {
            policy.no_repeated_chars = true;
        }

        Ok(policy)
    }
}
