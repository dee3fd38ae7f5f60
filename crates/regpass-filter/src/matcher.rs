//! Line matchers, one per stage kind
//!
//! A matcher answers "does this line match the stage's pattern". Polarity is
//! applied by the pipeline, never here.

use aho_corasick::AhoCorasick;
use regex::Regex;
use regpass_core::{Error, Result};
use regpass_policy::{CharClass, Stage};

/// Trait for all line matchers
pub trait LineMatcher: Send + Sync {
    /// Whether `line` matches this matcher's pattern
    fn is_match(&self, line: &str) -> bool;

    /// Get the matcher name
    fn name(&self) -> &str;
}

/// Build the matcher for a stage
pub fn matcher_for(stage: &Stage) -> Result<Box<dyn LineMatcher>> {
    let matcher: Box<dyn LineMatcher> = match stage {
        Stage::LengthAtLeast { min } => Box::new(LengthMatcher::at_least(*min)),
        Stage::LengthAtMost { max } => Box::new(LengthMatcher::at_most(*max)),
        Stage::ClassCountAtLeast { class, count } => {
            Box::new(ClassCountMatcher::new(class.clone(), *count))
        }
        Stage::Exclude { chars } => Box::new(CharSetMatcher::new(chars)?),
        Stage::NoImmediateRepeat => Box::new(RepeatMatcher),
        Stage::ContainsLiteral { text } => Box::new(LiteralMatcher::new(text)?),
    };
    Ok(matcher)
}

/// Whole-line length bound, counted in characters
pub struct LengthMatcher {
    min: usize,
    max: usize,
}

impl LengthMatcher {
    pub fn at_least(min: usize) -> Self {
        Self { min, max: usize::MAX }
    }

    pub fn at_most(max: usize) -> Self {
        Self { min: 0, max }
    }
}

impl LineMatcher for LengthMatcher {
    fn is_match(&self, line: &str) -> bool {
        let len = line.chars().count();
        len >= self.min && len <= self.max
    }

    fn name(&self) -> &str {
        "length"
    }
}

/// At least `count` characters from a class, by scan-and-count
pub struct ClassCountMatcher {
    class: CharClass,
    count: usize,
}

impl ClassCountMatcher {
    pub fn new(class: CharClass, count: usize) -> Self {
        Self { class, count }
    }
}

impl LineMatcher for ClassCountMatcher {
    fn is_match(&self, line: &str) -> bool {
        line.chars()
            .filter(|&c| self.class.contains(c))
            .take(self.count)
            .count()
            >= self.count
    }

    fn name(&self) -> &str {
        self.class.name()
    }
}

/// Any character from a set, as a regex bracket expression
pub struct CharSetMatcher {
    /// `None` for an empty set, which matches nothing
    regex: Option<Regex>,
}

impl CharSetMatcher {
    pub fn new(chars: &str) -> Result<Self> {
        if chars.is_empty() {
            return Ok(Self { regex: None });
        }

        let body: String = chars.chars().map(|c| regex::escape(&c.to_string())).collect();
        let regex = Regex::new(&format!("[{}]", body))
            .map_err(|e| Error::filter(format!("Failed to compile character set {:?}: {}", chars, e)))?;

        Ok(Self { regex: Some(regex) })
    }
}

impl LineMatcher for CharSetMatcher {
    fn is_match(&self, line: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(line))
    }

    fn name(&self) -> &str {
        "charset"
    }
}

/// Two identical adjacent characters.
///
/// `(.)\1` needs a backreference, which the regex crate does not support,
/// so adjacent pairs are compared directly.
pub struct RepeatMatcher;

impl LineMatcher for RepeatMatcher {
    fn is_match(&self, line: &str) -> bool {
        regpass_policy::has_immediate_repeat(line)
    }

    fn name(&self) -> &str {
        "repeat"
    }
}

/// Verbatim substring
pub struct LiteralMatcher {
    matcher: AhoCorasick,
}

impl LiteralMatcher {
    pub fn new(text: &str) -> Result<Self> {
        let matcher = AhoCorasick::new([text])
            .map_err(|e| Error::filter(format!("Failed to build literal matcher for {:?}: {}", text, e)))?;

        Ok(Self { matcher })
    }
}

impl LineMatcher for LiteralMatcher {
    fn is_match(&self, line: &str) -> bool {
        self.matcher.is_match(line)
    }

    fn name(&self) -> &str {
        "literal"
    }
}
