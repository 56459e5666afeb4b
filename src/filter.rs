//! Line-at-a-time filtering for the `dynstr` binary
//!
//! A [`LineFilter`] scans its input one line at a time into a single reused
//! [`DynString`], applies one [`LineOp`] to it and writes the result. Every
//! input line yields exactly one output line, except for `find`, which only
//! reports lines that contain the needle.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use bstr::ByteSlice;
use colored::Colorize;
use serde::Serialize;

use crate::buffer::{DynString, GrowthPolicy};
use crate::config::BufferConfig;
use crate::replace::ReplaceCursor;

/// The operation applied to each line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOp {
    Upper,
    Lower,
    Strip,
    Replace {
        pattern: String,
        replacement: String,
        /// Stop after this many replacements per line
        max: Option<usize>,
    },
    Slice {
        begin: Option<usize>,
        end: Option<usize>,
    },
    Find {
        needle: String,
        from: usize,
    },
    Classify,
}

/// Per-line classification emitted by `classify`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    pub line: usize,
    pub length: usize,
    pub capacity: usize,
    pub is_alpha: bool,
    pub is_alphanumeric: bool,
    pub is_non_alpha: bool,
    pub is_integer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer: Option<i64>,
    /// Status code of the failed conversion, see [`crate::IntegerError::code`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_error: Option<i32>,
}

impl LineReport {
    pub fn new(line: usize, s: &DynString) -> Self {
        let (integer, integer_error) = match s.to_integer() {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(err.code())),
        };

        Self {
            line,
            length: s.len(),
            capacity: s.capacity(),
            is_alpha: s.is_alpha(),
            is_alphanumeric: s.is_alphanumeric(),
            is_non_alpha: s.is_non_alpha(),
            is_integer: s.is_integer(),
            integer,
            integer_error,
        }
    }
}

/// Totals for one filter run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub lines: usize,
    /// Lines the operation changed or matched
    pub hits: usize,
}

pub struct LineFilter {
    op: LineOp,
    capacity: usize,
    policy: GrowthPolicy,
    scan_increment: usize,
    color: bool,
}

impl LineFilter {
    pub fn new(op: LineOp, buffer: &BufferConfig, color: bool) -> Self {
        Self {
            op,
            capacity: buffer.capacity(),
            policy: buffer.policy(),
            scan_increment: buffer.scan_increment(),
            color,
        }
    }

    /// Filter every line of `reader` into `writer`
    pub fn run<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<FilterStats> {
        let mut line = DynString::with_policy(self.capacity, self.policy)
            .context("Failed to allocate line buffer")?;
        let mut stats = FilterStats::default();

        loop {
            line.clear();
            let consumed = line
                .scan_line_with(reader, self.scan_increment)
                .with_context(|| format!("Failed to read line {}", stats.lines + 1))?;
            if consumed == 0 {
                break;
            }

            stats.lines += 1;
            if self.apply(stats.lines, &mut line, writer)? {
                stats.hits += 1;
            }
        }

        writer.flush().context("Failed to flush output")?;
        tracing::info!(lines = stats.lines, hits = stats.hits, "filter finished");
        Ok(stats)
    }

    /// Apply the operation to one line, returning whether it changed or matched
    fn apply<W: Write>(&self, number: usize, line: &mut DynString, out: &mut W) -> Result<bool> {
        let hit = match &self.op {
            LineOp::Upper | LineOp::Lower | LineOp::Strip => {
                let before = line.clone();
                match self.op {
                    LineOp::Upper => line.to_upper(),
                    LineOp::Lower => line.to_lower(),
                    _ => line.strip_non_alpha(),
                }
                write_line(out, line)?;
                *line != before
            }
            LineOp::Replace {
                pattern,
                replacement,
                max,
            } => {
                let count = replace_line(line, pattern, replacement, *max)
                    .with_context(|| format!("Replacement failed on line {}", number))?;
                write_line(out, line)?;
                count > 0
            }
            LineOp::Slice { begin, end } => match line.slice(*begin, *end) {
                Some(part) => {
                    write_line(out, &part)?;
                    true
                }
                None => {
                    writeln!(out)?;
                    false
                }
            },
            LineOp::Find { needle, from } => {
                let offsets = find_all(line, needle.as_bytes(), *from);
                if !offsets.is_empty() {
                    let listed: Vec<String> = offsets.iter().map(usize::to_string).collect();
                    writeln!(
                        out,
                        "{}:{}: {}",
                        number,
                        listed.join(","),
                        self.highlight(line.as_bytes(), &offsets, needle.len())
                    )?;
                }
                !offsets.is_empty()
            }
            LineOp::Classify => {
                let report = LineReport::new(number, line);
                let json = serde_json::to_string(&report).context("Failed to serialize line report")?;
                writeln!(out, "{}", json)?;
                report.is_integer
            }
        };
        Ok(hit)
    }

    fn highlight(&self, text: &[u8], offsets: &[usize], width: usize) -> String {
        let mut rendered = String::new();
        let mut last = 0;
        for &at in offsets {
            rendered.push_str(&text[last..at].to_str_lossy());
            let hit = text[at..at + width].to_str_lossy();
            if self.color {
                rendered.push_str(&hit.red().bold().to_string());
            } else {
                rendered.push('[');
                rendered.push_str(&hit);
                rendered.push(']');
            }
            last = at + width;
        }
        rendered.push_str(&text[last..].to_str_lossy());
        rendered
    }
}

fn write_line<W: Write>(out: &mut W, s: &DynString) -> Result<()> {
    s.write_to(out, false)?;
    writeln!(out)?;
    Ok(())
}

/// Replace up to `max` occurrences left to right with a fresh cursor
///
/// The line buffer is the same string for every line, so a
/// cursor carried across lines would resume mid-line.
fn replace_line(
    line: &mut DynString,
    pattern: &str,
    replacement: &str,
    max: Option<usize>,
) -> Result<usize, crate::GrowError> {
    let limit = max.unwrap_or(usize::MAX);
    let mut cursor = ReplaceCursor::new();
    let mut count = 0;
    while count < limit && cursor.replace_first(line, pattern, replacement)? {
        count += 1;
    }
    Ok(count)
}

/// Non-overlapping match offsets at or after `from`
fn find_all(line: &DynString, needle: &[u8], from: usize) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut at = from;
    while let Some(found) = line.find_from(needle, at) {
        offsets.push(found);
        at = found + needle.len();
    }
    offsets
}
