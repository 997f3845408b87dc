//! Whole-script processing.
//!
//! Splits a script into logical lines and parses each one independently.
//! Lines share no state, so they can be parsed on the rayon pool; results are
//! always reported in script order.

use bystander_foundation::{Error, Result};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::ast::ScriptLine;
use crate::lines::numbered_lines;
use crate::parser::parse_line;

/// What to do when a line fails to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failing line and return its error.
    #[default]
    Abort,
    /// Log the failure, record it in the report, and continue.
    Skip,
}

/// Configuration for processing a whole script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Policy for lines that fail to parse.
    pub policy: ErrorPolicy,
    /// Parse lines on the rayon thread pool.
    pub parallel: bool,
}

impl BatchConfig {
    /// Creates a sequential configuration that aborts on the first error.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policy: ErrorPolicy::Abort,
            parallel: false,
        }
    }

    /// Sets the error policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables parallel parsing.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// A successfully parsed line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedEntry {
    /// 1-based physical line number where the logical line starts.
    pub number: usize,
    /// The logical line text.
    pub source: String,
    /// The parsed line.
    pub line: ScriptLine,
}

/// A line that failed to parse under [`ErrorPolicy::Skip`].
#[derive(Debug)]
pub struct LineFailure {
    /// 1-based physical line number where the logical line starts.
    pub number: usize,
    /// The logical line text.
    pub source: String,
    /// Why the line failed.
    pub error: Error,
}

/// The result of processing a whole script.
#[derive(Debug, Default)]
pub struct ScriptReport {
    /// Parsed lines in script order.
    pub lines: Vec<ParsedEntry>,
    /// Lines skipped because they failed to parse.
    pub skipped: Vec<LineFailure>,
}

impl ScriptReport {
    /// Iterates over the parsed lines without their source text.
    pub fn script_lines(&self) -> impl Iterator<Item = &ScriptLine> {
        self.lines.iter().map(|entry| &entry.line)
    }

    /// Consumes the report, keeping only the parsed lines.
    #[must_use]
    pub fn into_script_lines(self) -> Vec<ScriptLine> {
        self.lines.into_iter().map(|entry| entry.line).collect()
    }

    /// Returns true if every line parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Adds one line's outcome, or returns its error under [`ErrorPolicy::Abort`].
    fn record(
        &mut self,
        number: usize,
        source: String,
        result: Result<ScriptLine>,
        policy: ErrorPolicy,
    ) -> Result<()> {
        match result {
            Ok(line) => self.lines.push(ParsedEntry {
                number,
                source,
                line,
            }),
            Err(error) => match policy {
                ErrorPolicy::Abort => return Err(error),
                ErrorPolicy::Skip => {
                    warn!(number, line = %source, %error, "skipping line");
                    self.skipped.push(LineFailure {
                        number,
                        source,
                        error,
                    });
                }
            },
        }
        Ok(())
    }
}

/// Parses every logical line of a script.
///
/// # Errors
/// Under [`ErrorPolicy::Abort`], returns the error of the first failing line
/// with its line number attached to the context.
pub fn parse_script(raw: &str, config: &BatchConfig) -> Result<ScriptReport> {
    let lines = numbered_lines(raw);
    debug!(
        lines = lines.len(),
        parallel = config.parallel,
        "parsing script"
    );

    let parse_one = |(number, source): (usize, String)| {
        trace!(number, "parsing line");
        let result = parse_line(&source)
            .map_err(|error| error.map_context(|ctx| ctx.with_line_number(number)));
        (number, source, result)
    };

    let mut report = ScriptReport::default();
    if config.parallel {
        let results: Vec<_> = lines.into_par_iter().map(parse_one).collect();
        for (number, source, result) in results {
            report.record(number, source, result, config.policy)?;
        }
    } else {
        // Parse lazily so an aborting batch stops at the failing line.
        for (number, source, result) in lines.into_iter().map(parse_one) {
            report.record(number, source, result, config.policy)?;
        }
    }

    debug!(
        parsed = report.lines.len(),
        skipped = report.skipped.len(),
        "script parsed"
    );
    Ok(report)
}
