//! Interactive policy collection
//!
//! Prompts for each policy field in turn and coerces the answers:
//! - blank or non-numeric counts become 0 (no limit for maximum length)
//! - blank special characters become the default set
//! - yes/no questions re-prompt until answered or left blank
//! - required sequences are split on commas and trimmed
//!
//! A run of digits too large for a count is the one hard input error.

use regpass_core::{Error, Result};
use regpass_policy::{Policy, DEFAULT_SPECIAL_CHARS};
use std::io::{BufRead, Write};
use tracing::debug;

/// Collects a [`Policy`] from a line-oriented console
pub struct PolicyCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PolicyCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output writer, e.g. to inspect prompts in tests
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for every policy field
    pub fn collect(&mut self) -> Result<Policy> {
        writeln!(self.output, "Step 1: Length Constraints")?;
        let min_length = self.prompt_count("Enter the minimum password length (default: 0): ")?;
        let max_length =
            parse_count(&self.prompt("Enter the maximum password length (leave blank for no limit): ")?)?;

        writeln!(self.output, "\nStep 2: Character Type Requirements")?;
        let upper = self.prompt_count("Minimum number of uppercase letters (default: 0): ")?;
        let lower = self.prompt_count("Minimum number of lowercase letters (default: 0): ")?;
        let digits = self.prompt_count("Minimum number of numeric digits (default: 0): ")?;
        let special = self.prompt_count("Minimum number of special characters (default: 0): ")?;

        writeln!(self.output, "\nStep 3: Special Characters")?;
        let special_chars = self.prompt(&format!(
            "Enter allowed special characters (default: {}): ",
            DEFAULT_SPECIAL_CHARS
        ))?;
        let special_chars = if special_chars.is_empty() {
            DEFAULT_SPECIAL_CHARS.to_string()
        } else {
            special_chars
        };

        writeln!(self.output, "\nStep 4: Prohibited Characters")?;
        let prohibited_chars = self.prompt("Enter prohibited characters (leave blank if none): ")?;

        writeln!(self.output, "\nStep 5: Additional Constraints")?;
        let no_repeated_chars = self.ask_yes_no("Disallow repeated characters?", false)?;
        let required_sequences = parse_sequences(
            &self.prompt("Enter required sequences (comma-separated, leave blank if none): ")?,
        );

        let policy = Policy {
            min_length,
            max_length,
            upper,
            lower,
            digits,
            special,
            special_chars,
            prohibited_chars,
            no_repeated_chars,
            required_sequences,
        };
        debug!(?policy, "Collected policy");
        Ok(policy)
    }

    /// Print a prompt and read one trimmed answer
    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before the policy was complete",
            )));
        }
        Ok(line.trim().to_string())
    }

    fn prompt_count(&mut self, text: &str) -> Result<usize> {
        let answer = self.prompt(text)?;
        Ok(parse_count(&answer)?.unwrap_or(0))
    }

    /// Ask until the answer is blank, `yes` or `no`
    pub fn ask_yes_no(&mut self, text: &str, default: bool) -> Result<bool> {
        let hint = if default { "yes" } else { "no" };
        loop {
            let answer = self
                .prompt(&format!("{} (yes/no, default: {}): ", text, hint))?
                .to_lowercase();

            match answer.as_str() {
                "" => return Ok(default),
                "yes" => return Ok(true),
                "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer 'yes' or 'no'.")?,
            }
        }
    }
}

/// Coerce a numeric answer.
///
/// Blank or non-numeric text yields `None`. Text made only of ASCII digits
/// that does not fit a `usize` is an [`Error::InvalidInput`].
pub fn parse_count(answer: &str) -> Result<Option<usize>> {
    let answer = answer.trim();
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }

    answer
        .parse::<usize>()
        .map(Some)
        .map_err(|e| Error::invalid_input(format!("{:?} is not a usable number: {}", answer, e)))
}

/// Split a comma-separated answer into trimmed sequences
pub fn parse_sequences(answer: &str) -> Vec<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Vec::new();
    }

    answer.split(',').map(|seq| seq.trim().to_string()).collect()
}
