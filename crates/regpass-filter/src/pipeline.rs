//! In-process execution of a compiled pipeline
//!
//! Follows the structure of the rendered `grep` chain:
//! - every stage is a predicate over the original line
//! - inverted stages pass lines that do *not* match
//! - a line survives only if every stage passes it
//!
//! Character sets hold exactly the policy's characters. Under POSIX bracket
//! rules the rendered `[\!...]` classes also contain a backslash, so a line
//! with `\` can differ between grep and this filter.

use crate::matcher::{matcher_for, LineMatcher};
use regpass_core::Result;
use regpass_policy::{Pipeline, Polarity, Stage};
use std::time::Instant;
use tracing::{debug, trace};

/// A compiled pipeline ready to filter lines
pub struct PipelineFilter {
    stages: Vec<FilterStage>,
}

/// A single stage in the filter
pub struct FilterStage {
    /// Stage this filter was built from
    pub stage: Stage,

    /// Polarity copied from the stage
    pub polarity: Polarity,

    matcher: Box<dyn LineMatcher>,
}

impl FilterStage {
    /// Build the filter for one stage
    pub fn new(stage: Stage) -> Result<Self> {
        let matcher = matcher_for(&stage)?;
        Ok(Self {
            polarity: stage.polarity(),
            stage,
            matcher,
        })
    }

    /// Whether this stage lets `line` through
    pub fn passes(&self, line: &str) -> bool {
        let matched = self.matcher.is_match(line);
        match self.polarity {
            Polarity::Normal => matched,
            Polarity::Inverted => !matched,
        }
    }

    /// Name of the underlying matcher
    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }
}

/// Outcome of running one line through the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every stage passed the line
    Accepted,

    /// Stage at `index` was the first to drop the line
    Rejected { index: usize, stage: Stage },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Counters collected by [`PipelineFilter::filter_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Lines read
    pub total: usize,

    /// Lines that survived every stage
    pub accepted: usize,

    /// Lines dropped per stage index
    pub rejected_by_stage: Vec<usize>,
}

impl PipelineFilter {
    /// Build matchers for every stage of a compiled pipeline
    pub fn new(pipeline: &Pipeline) -> Result<Self> {
        let stages = pipeline
            .stages()
            .iter()
            .cloned()
            .map(FilterStage::new)
            .collect::<Result<Vec<_>>>()?;

        debug!(stages = stages.len(), "Built pipeline filter");
        Ok(Self { stages })
    }

    /// Stages in pipeline order
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Whether `line` survives every stage; empty pipelines accept all lines
    pub fn accepts(&self, line: &str) -> bool {
        self.stages.iter().all(|stage| stage.passes(line))
    }

    /// Run `line` through the stages and report the first rejecting stage
    pub fn explain(&self, line: &str) -> Verdict {
        for (index, stage) in self.stages.iter().enumerate() {
            if !stage.passes(line) {
                trace!(
                    index,
                    stage = stage.stage.kind(),
                    matcher = stage.matcher_name(),
                    "Line rejected"
                );
                return Verdict::Rejected {
                    index,
                    stage: stage.stage.clone(),
                };
            }
        }
        Verdict::Accepted
    }

    /// Lazily keep the lines that pass every stage
    pub fn filter<'a, I, S>(&'a self, lines: I) -> impl Iterator<Item = S> + 'a
    where
        I: IntoIterator<Item = S> + 'a,
        I::IntoIter: 'a,
        S: AsRef<str> + 'a,
    {
        lines.into_iter().filter(move |line| self.accepts(line.as_ref()))
    }

    /// Filter every line, collecting survivors and per-stage rejection counts
    pub fn filter_all<I, S>(&self, lines: I) -> (Vec<S>, FilterStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let mut stats = FilterStats {
            rejected_by_stage: vec![0; self.stages.len()],
            ..FilterStats::default()
        };
        let mut survivors = Vec::new();

        for line in lines {
            stats.total += 1;
            match self.explain(line.as_ref()) {
                Verdict::Accepted => {
                    stats.accepted += 1;
                    survivors.push(line);
                }
                Verdict::Rejected { index, .. } => stats.rejected_by_stage[index] += 1,
            }
        }

        debug!(
            total = stats.total,
            accepted = stats.accepted,
            latency_us = start.elapsed().as_micros() as u64,
            "Filtered lines"
        );
        (survivors, stats)
    }
}
