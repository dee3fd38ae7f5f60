//! Password policy definition

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Special characters used when a policy does not name its own set
pub const DEFAULT_SPECIAL_CHARS: &str = "!@#$%^&*";

/// A password composition policy.
///
/// Every field has a neutral default, so a policy document only needs to
/// name the constraints it cares about. The compiler reads each field
/// independently and never cross-checks them; see [`crate::validate`] for
/// the explicit consistency pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Minimum line length in characters (0 = no constraint)
    pub min_length: usize,

    /// Maximum line length in characters (`None` or 0 = no limit)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Minimum number of uppercase letters `A-Z`
    pub upper: usize,

    /// Minimum number of lowercase letters `a-z`
    pub lower: usize,

    /// Minimum number of digits `0-9`
    pub digits: usize,

    /// Minimum number of characters from `special_chars`
    pub special: usize,

    /// Characters counted as special
    pub special_chars: String,

    /// Characters that must never appear
    pub prohibited_chars: String,

    /// Reject any character immediately followed by itself
    pub no_repeated_chars: bool,

    /// Literal substrings that must all appear
    pub required_sequences: Vec<String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: None,
            upper: 0,
            lower: 0,
            digits: 0,
            special: 0,
            special_chars: DEFAULT_SPECIAL_CHARS.to_string(),
            prohibited_chars: String::new(),
            no_repeated_chars: false,
            required_sequences: Vec::new(),
        }
    }
}

impl Policy {
    /// Create a policy with every constraint disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a policy from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a policy from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a policy from a file, picking the format from its extension.
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> regpass_core::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let policy = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        tracing::debug!(path = %path.display(), "Loaded policy file");
        Ok(policy)
    }

    /// Upper length bound, treating `Some(0)` as no limit
    pub fn effective_max_length(&self) -> Option<usize> {
        self.max_length.filter(|&max| max > 0)
    }

    /// Whether compiling this policy would emit no stages at all
    pub fn is_unconstrained(&self) -> bool {
        self.min_length == 0
            && self.effective_max_length().is_none()
            && self.upper == 0
            && self.lower == 0
            && self.digits == 0
            && self.special == 0
            && self.prohibited_chars.is_empty()
            && !self.no_repeated_chars
            && self.required_sequences.is_empty()
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the minimum counts for uppercase, lowercase, digit and special characters
    pub fn with_class_counts(mut self, upper: usize, lower: usize, digits: usize, special: usize) -> Self {
        self.upper = upper;
        self.lower = lower;
        self.digits = digits;
        self.special = special;
        self
    }

    pub fn with_special_chars(mut self, chars: impl Into<String>) -> Self {
        self.special_chars = chars.into();
        self
    }

    pub fn with_prohibited_chars(mut self, chars: impl Into<String>) -> Self {
        self.prohibited_chars = chars.into();
        self
    }

    pub fn with_no_repeated_chars(mut self, enabled: bool) -> Self {
        self.no_repeated_chars = enabled;
        self
    }

    pub fn with_required_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.required_sequences.push(sequence.into());
        self
    }
}
