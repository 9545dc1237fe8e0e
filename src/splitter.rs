//! Splitting a raw input line into at most two command segments.

use crate::command::CommandSpec;
use std::fmt;
use std::ops::Range;

/// The single operator recognised on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    /// No operator; the whole line is one command.
    #[default]
    None,
    /// `cmd1 | cmd2`
    Pipe,
    /// `cmd1 && cmd2`
    And,
    /// `cmd1 || cmd2`
    Or,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::None => "",
            Operator::Pipe => "|",
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::None => write!(f, "none"),
            op => write!(f, "{}", op.symbol()),
        }
    }
}

/// A line split around its operator.
///
/// `second` is empty when `operator` is [`Operator::None`], and may also be
/// empty when the operator has nothing on its right-hand side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitLine {
    pub first: CommandSpec,
    pub second: CommandSpec,
    pub operator: Operator,
}

/// Split `line` into two whitespace-tokenized segments around its operator.
///
/// Precedence: a pipe is looked for first, then `&&`, then `||`. Only the
/// first occurrence of the winning operator splits the line; anything after it
/// (including further operator text) becomes tokens of the second segment.
/// Operators are found by plain text search, so `echo a&&b` splits as well.
pub fn split(line: &str) -> SplitLine {
    match classify(line) {
        Some((operator, at)) => SplitLine {
            first: CommandSpec::tokenize(&line[..at.start]),
            second: CommandSpec::tokenize(&line[at.end..]),
            operator,
        },
        None => SplitLine {
            first: CommandSpec::tokenize(line),
            second: CommandSpec::default(),
            operator: Operator::None,
        },
    }
}

/// Find the governing operator and the byte range of its first occurrence.
fn classify(line: &str) -> Option<(Operator, Range<usize>)> {
    if let Some(at) = find_pipe(line) {
        return Some((Operator::Pipe, at..at + 1));
    }
    for operator in [Operator::And, Operator::Or] {
        let symbol = operator.symbol();
        if let Some(at) = line.find(symbol) {
            return Some((operator, at..at + symbol.len()));
        }
    }
    None
}

/// Position of the first `|` that is not part of a longer run such as `||`.
fn find_pipe(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] != b'|' {
            pos += 1;
            continue;
        }
        let run = bytes[pos..].iter().take_while(|&&b| b == b'|').count();
        if run == 1 {
            return Some(pos);
        }
        pos += run;
    }
    None
}
