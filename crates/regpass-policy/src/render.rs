//! Rendering of stages into grep commands
//!
//! Every stage becomes one `grep -E` invocation. Inverted stages get the
//! `-v` flag, taken from [`Stage::polarity`] and nothing else. Commands are
//! joined with [`PIPE_SEPARATOR`] so each stage filters the output of the
//! previous one.

use crate::escape::{escape_class, escape_literal};
use crate::stage::{CharClass, Polarity, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between rendered commands
pub const PIPE_SEPARATOR: &str = " | ";

/// A single rendered filter command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Polarity copied from the stage
    pub polarity: Polarity,

    /// Extended regular expression handed to grep, already escaped
    pub pattern: String,
}

impl Command {
    /// Render a stage into its command
    pub fn from_stage(stage: &Stage) -> Self {
        Self {
            polarity: stage.polarity(),
            pattern: stage_pattern(stage),
        }
    }

    /// Full command text, e.g. `grep -v -E "[xyz]"`
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.polarity {
            Polarity::Normal => write!(f, "grep -E \"{}\"", self.pattern),
            Polarity::Inverted => write!(f, "grep -v -E \"{}\"", self.pattern),
        }
    }
}

/// Build the grep pattern for a stage
pub fn stage_pattern(stage: &Stage) -> String {
    match stage {
        Stage::LengthAtLeast { min } => format!("^.{{{},}}$", min),
        Stage::LengthAtMost { max } => format!("^.{{,{}}}$", max),
        Stage::ClassCountAtLeast { class, count } => {
            format!("([{}].*){{{},}}", class_body(class), count)
        }
        Stage::Exclude { chars } => format!("[{}]", escape_class(chars)),
        Stage::NoImmediateRepeat => r"(.)\1".to_string(),
        Stage::ContainsLiteral { text } => escape_literal(text),
    }
}

fn class_body(class: &CharClass) -> String {
    match class {
        CharClass::Upper => "A-Z".to_string(),
        CharClass::Lower => "a-z".to_string(),
        CharClass::Digit => "0-9".to_string(),
        CharClass::Special(chars) => escape_class(chars),
    }
}

/// Ordered stages produced by one compilation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Create a pipeline from stages in emission order
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Stages in emission order
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Consume the pipeline, returning its stages
    pub fn into_stages(self) -> Vec<Stage> {
        self.stages
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// An empty pipeline passes every line through unchanged
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Render each stage to its command
    pub fn commands(&self) -> Vec<Command> {
        self.stages.iter().map(Command::from_stage).collect()
    }

    /// Render the whole pipeline; empty pipelines render to `""`
    pub fn render(&self) -> String {
        self.stages
            .iter()
            .map(|stage| Command::from_stage(stage).text())
            .collect::<Vec<_>>()
            .join(PIPE_SEPARATOR)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
