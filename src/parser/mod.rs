mod action;
mod pattern;

use tracing::debug;

use crate::ast::*;
use crate::error::{Error, Result};

use action::parse_action;
use pattern::parse_pattern;

/// Structural parser for pawk programs.
///
/// There is no tokenizer: the program text is sliced on the `BEGIN` and
/// `END` keywords and on brace and slash delimiters, and each slice is
/// handed to the pattern or action compiler.
///
/// The `END` keyword is located by plain substring search, so a regex
/// pattern containing the text `END` splits the program in the wrong place.
pub struct Parser<'a> {
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Parse a complete program
    pub fn parse(&self) -> Result<Program> {
        let mut program = Program::new();
        let mut rest = self.source.trim();

        if let Some(after) = rest.strip_prefix("BEGIN") {
            let close = find_unescaped(after, '}')
                .ok_or_else(|| Error::syntax("missing closing `}` for BEGIN", rest))?;
            program.begin = Some(parse_action(&after[..=close])?);
            rest = after[close + 1..].trim();
        }

        if let Some(idx) = rest.find("END") {
            program.end = Some(parse_action(&rest[idx + 3..])?);
            rest = rest[..idx].trim();
        }

        if !rest.is_empty() {
            program.rule = Some(parse_rule(rest)?);
        } else if program.begin.is_none() && program.end.is_none() {
            return Err(Error::syntax("empty program", self.source));
        }

        debug!(
            begin = program.begin.is_some(),
            rule = program.rule.is_some(),
            end = program.end.is_some(),
            "parsed program"
        );

        Ok(program)
    }
}

/// Parse the single body rule: an optional pattern and an optional action
fn parse_rule(text: &str) -> Result<Rule> {
    let (pattern, rest) = parse_pattern(text)?;

    let action = if rest.is_empty() {
        Action::print_record()
    } else {
        parse_action(rest)?
    };

    Ok(Rule { pattern, action })
}

/// Byte offset of the first `target` not preceded by a backslash
fn find_unescaped(text: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == target {
            return Some(i);
        }
    }
    None
}
