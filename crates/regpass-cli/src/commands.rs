//! Subcommand implementations
//!
//! Console handles are passed in so each command can be driven from tests.

use crate::cli::{Cli, Commands, PolicyArgs};
use crate::collector::PolicyCollector;
use crate::config::CliConfig;
use crate::output::{format_issues, format_pipeline, OutputFormat, PIPELINE_LABEL};
use regpass_filter::{filter_for_policy, Verdict};
use regpass_policy::{compile, validate, Policy, Severity};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::process::ExitCode;
use tracing::{debug, info, warn};

/// Run the parsed command line against the given console
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: R, output: &mut W) -> anyhow::Result<ExitCode> {
    let config = CliConfig::load(&cli.config, cli)?;

    match &cli.command {
        None | Some(Commands::Interactive) => run_interactive(&config, input, output),
        Some(Commands::Compile { policy, format }) => {
            run_compile(&config, policy, format.unwrap_or(config.format), output)
        }
        Some(Commands::Filter { policy, input: path }) => match path {
            Some(path) => {
                let file = BufReader::new(File::open(path)?);
                run_filter(&config, policy, file, output)
            }
            None => run_filter(&config, policy, input, output),
        },
        Some(Commands::Check { policy }) => run_check(&config, policy, output),
    }
}

/// Prompt for a policy and print its pipeline
pub fn run_interactive<R: BufRead, W: Write>(
    config: &CliConfig,
    input: R,
    output: &mut W,
) -> anyhow::Result<ExitCode> {
    writeln!(output, "\nWelcome to RegPass!")?;
    writeln!(
        output,
        "This interactive tool helps you generate grep commands for any password policy.\n"
    )?;

    let policy = PolicyCollector::new(input, &mut *output).collect()?;
    check_policy(config, &policy)?;

    writeln!(output, "\nGenerating grep commands...")?;
    writeln!(output, "\n{}", PIPELINE_LABEL)?;
    writeln!(output, "{}", compile(&policy).render())?;
    writeln!(output, "\nUse this command to filter passwords based on the specified policy.")?;

    Ok(ExitCode::SUCCESS)
}

/// Print the pipeline for a policy file
pub fn run_compile<W: Write>(
    config: &CliConfig,
    args: &PolicyArgs,
    format: OutputFormat,
    output: &mut W,
) -> anyhow::Result<ExitCode> {
    let policy = config.resolve_policy(args)?;
    check_policy(config, &policy)?;

    if policy.is_unconstrained() {
        warn!("Policy has no constraints; the pipeline passes every line");
    }

    let pipeline = compile(&policy);
    info!(stages = pipeline.len(), "Compiled policy");
    writeln!(output, "{}", format_pipeline(&pipeline, format)?)?;

    Ok(ExitCode::SUCCESS)
}

/// Print the lines of `input` that satisfy the policy.
///
/// Lines are read as bytes. Invalid UTF-8 is matched after lossy decoding
/// and written back unchanged.
pub fn run_filter<R: BufRead, W: Write>(
    config: &CliConfig,
    args: &PolicyArgs,
    input: R,
    output: &mut W,
) -> anyhow::Result<ExitCode> {
    let policy = config.resolve_policy(args)?;
    check_policy(config, &policy)?;

    let filter = filter_for_policy(&policy)?;
    let mut total = 0usize;
    let mut accepted = 0usize;
    let mut lossy = 0usize;

    for line in input.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        total += 1;

        let text = String::from_utf8_lossy(&line);
        if matches!(text, Cow::Owned(_)) {
            lossy += 1;
        }

        match filter.explain(&text) {
            Verdict::Accepted => {
                accepted += 1;
                output.write_all(&line)?;
                output.write_all(b"\n")?;
            }
            Verdict::Rejected { index, stage } => {
                debug!(line = total, index, %stage, "Line rejected");
            }
        }
    }

    if lossy > 0 {
        warn!(lines = lossy, "Matched lines with invalid UTF-8 after lossy decoding");
    }
    info!(total, accepted, "Filtered wordlist");
    Ok(ExitCode::SUCCESS)
}

/// Report consistency issues; fails when any issue is unsatisfiable
pub fn run_check<W: Write>(
    config: &CliConfig,
    args: &PolicyArgs,
    output: &mut W,
) -> anyhow::Result<ExitCode> {
    let policy = config.resolve_policy(args)?;
    let issues = validate(&policy);
    writeln!(output, "{}", format_issues(&issues))?;

    let unsatisfiable = issues
        .iter()
        .any(|issue| issue.severity() == Severity::Unsatisfiable);
    Ok(if unsatisfiable {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Log issues, or reject the policy in strict mode
fn check_policy(config: &CliConfig, policy: &Policy) -> regpass_core::Result<()> {
    if config.strict {
        return policy.validate();
    }

    for issue in validate(policy) {
        warn!(severity = ?issue.severity(), "{}", issue);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Cursor;

    fn run_with(args: &[&str], stdin: &str) -> (anyhow::Result<ExitCode>, String) {
        let mut argv = vec!["regpass", "--config", "/nonexistent/regpass.yaml"];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);

        let mut out = Vec::new();
        let result = run(&cli, Cursor::new(stdin.to_string()), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_interactive_common_policy() {
        let answers = "8\n\n1\n1\n1\n1\n\n\n\n\n";
        let (result, out) = run_with(&[], answers);

        assert_eq!(result.unwrap(), ExitCode::SUCCESS);
        assert!(out.contains("Welcome to RegPass!"));
        assert!(out.contains(concat!(
            "Generated Command:\n",
            r#"grep -E "^.{8,}$" | grep -E "([A-Z].*){1,}" | "#,
            r#"grep -E "([a-z].*){1,}" | grep -E "([0-9].*){1,}" | "#,
            r#"grep -E "([\!@\#\$%\^\&\*].*){1,}""#,
            "\n"
        )));
    }

    #[test]
    fn test_interactive_overflow_prints_no_pipeline() {
        let (result, out) = run_with(&["interactive"], "123456789012345678901234567890\n");

        let err = result.unwrap_err();
        let core = err.downcast_ref::<regpass_core::Error>().unwrap();
        assert!(core.is_invalid_input());
        assert!(!out.contains(PIPELINE_LABEL));
    }

    #[test]
    fn test_interactive_strict_rejects() {
        let answers = "10\n5\n\n\n\n\n\n\n\n\n";
        let (result, out) = run_with(&["--strict", "interactive"], answers);

        assert!(result.is_err());
        assert!(!out.contains(PIPELINE_LABEL));
    }

    #[test]
    fn test_compile_defaults_to_empty_pipeline() {
        let (result, out) = run_with(&["compile", "--format", "raw"], "");
        assert_eq!(result.unwrap(), ExitCode::SUCCESS);
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_filter_from_stdin() {
        let (result, out) = run_with(
            &["filter", "--min-length", "4", "--no-repeat"],
            "abc\nabcd\naabb\nwxyz\n",
        );
        assert_eq!(result.unwrap(), ExitCode::SUCCESS);
        assert_eq!(out, "abcd\nwxyz\n");
    }

    #[test]
    fn test_filter_keeps_going_past_invalid_utf8() {
        let cli = Cli::parse_from([
            "regpass",
            "--config",
            "/nonexistent/regpass.yaml",
            "filter",
            "--min-length",
            "3",
        ]);
        let input: &[u8] = b"good1\npa\xffss\nab\nalso_good\r\n";

        let mut out = Vec::new();
        let result = run(&cli, Cursor::new(input), &mut out);

        assert_eq!(result.unwrap(), ExitCode::SUCCESS);
        assert_eq!(out, b"good1\npa\xffss\nalso_good\n".to_vec());
    }

    #[test]
    fn test_check_reports_failure() {
        let (result, out) = run_with(&["check", "--min-length", "9", "--max-length", "4"], "");
        assert_eq!(result.unwrap(), ExitCode::FAILURE);
        assert_eq!(out, "error: minimum length 9 exceeds maximum length 4\n");
    }
}
