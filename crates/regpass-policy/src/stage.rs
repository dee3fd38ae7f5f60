//! Filter stage definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// One atomic constraint derived from a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Whole line is at least `min` characters long
    LengthAtLeast {
        min: usize,
    },

    /// Whole line is at most `max` characters long
    LengthAtMost {
        max: usize,
    },

    /// Line contains at least `count` characters from `class`
    ClassCountAtLeast {
        class: CharClass,
        count: usize,
    },

    /// Line contains none of `chars`
    Exclude {
        chars: String,
    },

    /// No character is immediately followed by itself
    NoImmediateRepeat,

    /// Line contains `text` verbatim
    ContainsLiteral {
        text: String,
    },
}

/// Character class counted by [`Stage::ClassCountAtLeast`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    /// `A-Z`
    Upper,
    /// `a-z`
    Lower,
    /// `0-9`
    Digit,
    /// A caller-supplied character set
    Special(String),
}

/// Whether a stage passes lines that match its pattern or lines that do not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Pass lines whose content matches
    Normal,
    /// Pass lines whose content does not match
    Inverted,
}

impl Stage {
    /// Polarity of this stage.
    ///
    /// Negative constraints (prohibited characters, adjacent repeats) are
    /// expressed as a pattern for the *violation* and are always inverted.
    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Exclude { .. } | Self::NoImmediateRepeat => Polarity::Inverted,
            Self::LengthAtLeast { .. }
            | Self::LengthAtMost { .. }
            | Self::ClassCountAtLeast { .. }
            | Self::ContainsLiteral { .. } => Polarity::Normal,
        }
    }

    /// Short kind name, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LengthAtLeast { .. } => "length_at_least",
            Self::LengthAtMost { .. } => "length_at_most",
            Self::ClassCountAtLeast { .. } => "class_count_at_least",
            Self::Exclude { .. } => "exclude",
            Self::NoImmediateRepeat => "no_immediate_repeat",
            Self::ContainsLiteral { .. } => "contains_literal",
        }
    }
}

impl CharClass {
    /// Whether `c` belongs to this class
    pub fn contains(&self, c: char) -> bool {
        match self {
            Self::Upper => c.is_ascii_uppercase(),
            Self::Lower => c.is_ascii_lowercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::Special(chars) => chars.contains(c),
        }
    }

    /// Human-readable class name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upper => "uppercase",
            Self::Lower => "lowercase",
            Self::Digit => "digit",
            Self::Special(_) => "special",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthAtLeast { min } => write!(f, "at least {} characters", min),
            Self::LengthAtMost { max } => write!(f, "at most {} characters", max),
            Self::ClassCountAtLeast { class, count } => {
                write!(f, "at least {} {} characters", count, class.name())
            }
            Self::Exclude { chars } => write!(f, "none of {:?}", chars),
            Self::NoImmediateRepeat => write!(f, "no immediately repeated characters"),
            Self::ContainsLiteral { text } => write!(f, "contains {:?}", text),
        }
    }
}
