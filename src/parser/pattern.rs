use regex::Regex;

use crate::ast::Pattern;
use crate::error::{Error, Result};

/// Compile the pattern at the front of a rule.
///
/// Returns the pattern and the residual (trimmed) action text. Text that
/// starts with neither `/` nor `NR==` has no pattern and is returned whole.
pub(crate) fn parse_pattern(text: &str) -> Result<(Pattern, &str)> {
    let text = text.trim();

    if let Some(body) = text.strip_prefix('/') {
        let close = body
            .find('/')
            .ok_or_else(|| Error::syntax("missing closing `/` for pattern", text))?;
        let source = &body[..close];
        let regex = Regex::new(source).map_err(|e| Error::invalid_regex(source, e))?;
        return Ok((Pattern::Regex(regex), body[close + 1..].trim()));
    }

    if let Some(body) = text.strip_prefix("NR==") {
        // The number runs to the next whitespace, or to an action glued onto it
        let end = body
            .find(|c: char| c.is_whitespace() || c == '{')
            .unwrap_or(body.len());
        let digits = &body[..end];
        let line = digits
            .parse::<i64>()
            .map_err(|_| Error::invalid_line_number(digits))?;
        return Ok((Pattern::LineNumber(line), body[end..].trim()));
    }

    Ok((Pattern::Always, text))
}
