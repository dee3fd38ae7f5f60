//! Output formatting for compiled pipelines and policy reports

use regpass_policy::{Command, Pipeline, PolicyIssue, Severity, Stage};
use serde::{Deserialize, Serialize};

/// Label printed before the pipeline in text mode
pub const PIPELINE_LABEL: &str = "Generated Command:";

/// How compiled pipelines are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Label followed by the pipeline text
    #[default]
    Text,
    /// Pipeline text, stages and rendered commands as JSON
    Json,
    /// Pipeline text only, suitable for `eval` or scripts
    Raw,
}

#[derive(Debug, Serialize)]
struct PipelineReport<'a> {
    pipeline: String,
    stages: Vec<StageReport<'a>>,
}

#[derive(Debug, Serialize)]
struct StageReport<'a> {
    stage: &'a Stage,
    #[serde(flatten)]
    command: Command,
    text: String,
}

/// Format a compiled pipeline
pub fn format_pipeline(pipeline: &Pipeline, format: OutputFormat) -> anyhow::Result<String> {
    let formatted = match format {
        OutputFormat::Text => format!("{}\n{}", PIPELINE_LABEL, pipeline.render()),
        OutputFormat::Raw => pipeline.render(),
        OutputFormat::Json => {
            let report = PipelineReport {
                pipeline: pipeline.render(),
                stages: pipeline
                    .stages()
                    .iter()
                    .map(|stage| {
                        let command = Command::from_stage(stage);
                        StageReport {
                            stage,
                            text: command.text(),
                            command,
                        }
                    })
                    .collect(),
            };
            serde_json::to_string_pretty(&report)?
        }
    };
    Ok(formatted)
}

/// Format validation findings, one per line
pub fn format_issues(issues: &[PolicyIssue]) -> String {
    if issues.is_empty() {
        return "Policy is consistent.".to_string();
    }

    issues
        .iter()
        .map(|issue| {
            let tag = match issue.severity() {
                Severity::Unsatisfiable => "error",
                Severity::Warning => "warning",
            };
            format!("{}: {}", tag, issue)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regpass_policy::{compile, Policy};

    #[test]
    fn test_text_format() {
        let pipeline = compile(&Policy::new().with_min_length(8));
        let out = format_pipeline(&pipeline, OutputFormat::Text).unwrap();
        assert_eq!(out, "Generated Command:\ngrep -E \"^.{8,}$\"");
    }

    #[test]
    fn test_raw_format_empty_pipeline() {
        let out = format_pipeline(&Pipeline::default(), OutputFormat::Raw).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_json_format() {
        let pipeline = compile(&Policy::new().with_prohibited_chars("xyz"));
        let out = format_pipeline(&pipeline, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["pipeline"], "grep -v -E \"[xyz]\"");
        assert_eq!(value["stages"][0]["polarity"], "inverted");
        assert_eq!(value["stages"][0]["pattern"], "[xyz]");
        assert_eq!(value["stages"][0]["stage"]["type"], "exclude");
    }

    #[test]
    fn test_format_issues() {
        assert_eq!(format_issues(&[]), "Policy is consistent.");

        let issues = vec![
            PolicyIssue::LengthBoundsInverted { min: 9, max: 4 },
            PolicyIssue::EmptyRequiredSequence,
        ];
        assert_eq!(
            format_issues(&issues),
            "error: minimum length 9 exceeds maximum length 4\n\
             warning: empty required sequence matches every line"
        );
    }
}
