//! Consistency checks for policies
//!
//! The compiler renders whatever a policy says, even when no password could
//! ever satisfy it. This pass is invoked separately to report such
//! policies; it never changes what the compiler emits.

use crate::Policy;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// A problem found in a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum PolicyIssue {
    /// `min_length` is larger than `max_length`
    LengthBoundsInverted { min: usize, max: usize },

    /// `special > 0` with an empty special character set
    EmptySpecialChars,

    /// Required class counts cannot fit within `max_length`
    ClassCountsExceedMax { required: usize, max: usize },

    /// A required sequence contains a prohibited character
    RequiredContainsProhibited { sequence: String, ch: char },

    /// A required sequence repeats a character while repeats are forbidden
    RequiredHasRepeat { sequence: String },

    /// A required sequence is longer than `max_length`
    SequenceTooLong { sequence: String, max: usize },

    /// A special character is also prohibited
    SpecialCharProhibited { ch: char },

    /// A required sequence is empty and matches every line
    EmptyRequiredSequence,

    /// Special characters are required but every one of them is prohibited
    NoUsableSpecialChars,
}

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The policy still accepts some passwords
    Warning,
    /// No line can pass the compiled pipeline
    Unsatisfiable,
}

impl PolicyIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::SpecialCharProhibited { .. } | Self::EmptyRequiredSequence => Severity::Warning,
            Self::LengthBoundsInverted { .. }
            | Self::EmptySpecialChars
            | Self::ClassCountsExceedMax { .. }
            | Self::RequiredContainsProhibited { .. }
            | Self::RequiredHasRepeat { .. }
            | Self::SequenceTooLong { .. }
            | Self::NoUsableSpecialChars => Severity::Unsatisfiable,
        }
    }
}

impl fmt::Display for PolicyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthBoundsInverted { min, max } => {
                write!(f, "minimum length {} exceeds maximum length {}", min, max)
            }
            Self::EmptySpecialChars => {
                write!(f, "special characters are required but the special set is empty")
            }
            Self::ClassCountsExceedMax { required, max } => write!(
                f,
                "character classes require {} characters but maximum length is {}",
                required, max
            ),
            Self::RequiredContainsProhibited { sequence, ch } => write!(
                f,
                "required sequence {:?} contains prohibited character {:?}",
                sequence, ch
            ),
            Self::RequiredHasRepeat { sequence } => write!(
                f,
                "required sequence {:?} repeats a character but repeats are disallowed",
                sequence
            ),
            Self::SequenceTooLong { sequence, max } => write!(
                f,
                "required sequence {:?} is longer than maximum length {}",
                sequence, max
            ),
            Self::SpecialCharProhibited { ch } => {
                write!(f, "special character {:?} is also prohibited", ch)
            }
            Self::EmptyRequiredSequence => write!(f, "empty required sequence matches every line"),
            Self::NoUsableSpecialChars => {
                write!(f, "special characters are required but all of them are prohibited")
            }
        }
    }
}

/// Report every consistency issue in `policy`
pub fn validate(policy: &Policy) -> Vec<PolicyIssue> {
    let mut issues = Vec::new();
    let max = policy.effective_max_length();

    if let Some(max) = max {
        if policy.min_length > max {
            issues.push(PolicyIssue::LengthBoundsInverted {
                min: policy.min_length,
                max,
            });
        }

        let required = policy.upper + policy.lower + policy.digits + policy.special;
        if required > max {
            issues.push(PolicyIssue::ClassCountsExceedMax { required, max });
        }
    }

    if policy.special > 0 {
        if policy.special_chars.is_empty() {
            issues.push(PolicyIssue::EmptySpecialChars);
        }

        for ch in policy.special_chars.chars() {
            if policy.prohibited_chars.contains(ch) {
                issues.push(PolicyIssue::SpecialCharProhibited { ch });
            }
        }
    }

    for sequence in &policy.required_sequences {
        if sequence.is_empty() {
            issues.push(PolicyIssue::EmptyRequiredSequence);
            continue;
        }

        if let Some(ch) = sequence.chars().find(|&c| policy.prohibited_chars.contains(c)) {
            issues.push(PolicyIssue::RequiredContainsProhibited {
                sequence: sequence.clone(),
                ch,
            });
        }

        if policy.no_repeated_chars && has_immediate_repeat(sequence) {
            issues.push(PolicyIssue::RequiredHasRepeat {
                sequence: sequence.clone(),
            });
        }

        if let Some(max) = max {
            if sequence.chars().count() > max {
                issues.push(PolicyIssue::SequenceTooLong {
                    sequence: sequence.clone(),
                    max,
                });
            }
        }
    }

    let all_specials_prohibited = !policy.special_chars.is_empty()
        && policy
            .special_chars
            .chars()
            .all(|c| policy.prohibited_chars.contains(c));
    if policy.special > 0 && all_specials_prohibited {
        issues.push(PolicyIssue::NoUsableSpecialChars);
    }

    for issue in &issues {
        debug!(issue = %issue, severity = ?issue.severity(), "Policy issue");
    }

    issues
}

/// Whether any character in `text` is immediately followed by itself
pub fn has_immediate_repeat(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(mut prev) = chars.next() else {
        return false;
    };

    for c in chars {
        if c == prev {
            return true;
        }
        prev = c;
    }

    false
}

impl Policy {
    /// Fail on the first issue that makes the policy unsatisfiable
    pub fn validate(&self) -> regpass_core::Result<()> {
        match validate(self)
            .into_iter()
            .find(|issue| issue.severity() == Severity::Unsatisfiable)
        {
            Some(issue) => Err(regpass_core::Error::policy(issue.to_string())),
            None => Ok(()),
        }
    }
}
