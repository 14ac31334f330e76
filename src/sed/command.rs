use regex::Regex;

use crate::error::{Error, Result};

/// Which lines a command applies to
#[derive(Debug, Clone)]
pub enum Address {
    /// Every line
    Always,
    /// A single 1-based line number
    Line(usize),
    /// Lines containing a match
    Regex(Regex),
}

impl Address {
    pub fn matches(&self, line: &str, line_number: usize) -> bool {
        match self {
            Address::Always => true,
            Address::Line(n) => *n == line_number,
            Address::Regex(regex) => regex.is_match(line),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CommandKind {
    /// s/regex/replacement/[g]; `replacement` is already in `regex` crate syntax
    Substitute {
        regex: Regex,
        replacement: String,
        global: bool,
    },
    /// d
    Delete,
    /// p
    Print,
}

/// A compiled editing command
#[derive(Debug, Clone)]
pub struct Command {
    pub address: Address,
    pub kind: CommandKind,
}

/// Compile a command: an optional address followed by `s`, `d` or `p`
pub fn parse_command(text: &str) -> Result<Command> {
    let text = text.trim();
    let (address, rest) = parse_address(text)?;
    let rest = rest.trim();

    let kind = match rest.as_bytes().first().copied() {
        Some(b's') => parse_substitute(&rest[1..], text)?,
        Some(b'd') if rest.len() == 1 => CommandKind::Delete,
        Some(b'p') if rest.len() == 1 => CommandKind::Print,
        _ => return Err(Error::unsupported_command(text)),
    };

    Ok(Command { address, kind })
}

fn parse_address(text: &str) -> Result<(Address, &str)> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let line = text[..digits]
            .parse::<usize>()
            .map_err(|_| Error::invalid_line_number(&text[..digits]))?;
        return Ok((Address::Line(line), &text[digits..]));
    }

    if let Some(body) = text.strip_prefix('/') {
        let (source, rest) = read_delimited(body, '/', Part::Regex)
            .ok_or_else(|| Error::syntax("missing closing `/` for address", text))?;
        let regex = Regex::new(&source).map_err(|e| Error::invalid_regex(source.as_str(), e))?;
        return Ok((Address::Regex(regex), rest));
    }

    Ok((Address::Always, text))
}

/// Parse what follows the `s`: a delimiter, pattern, replacement and flags
fn parse_substitute(body: &str, command: &str) -> Result<CommandKind> {
    let mut chars = body.chars();
    let delim = chars
        .next()
        .filter(|c| !c.is_alphanumeric() && *c != '\\' && *c != '\n')
        .ok_or_else(|| Error::syntax("invalid substitute delimiter", command))?;

    let body = chars.as_str();
    let (pattern, rest) = read_delimited(body, delim, Part::Regex)
        .ok_or_else(|| Error::syntax("malformed substitute command", command))?;
    // The closing delimiter after the replacement is optional
    let (replacement, flags) = read_delimited(rest, delim, Part::Replacement)
        .unwrap_or_else(|| (rest.to_string(), ""));

    let global = match flags {
        "" => false,
        "g" => true,
        _ => return Err(Error::syntax(format!("unknown substitute flag `{flags}`"), command)),
    };

    let regex = Regex::new(&pattern).map_err(|e| Error::invalid_regex(pattern.as_str(), e))?;

    Ok(CommandKind::Substitute {
        regex,
        replacement: translate_replacement(&replacement),
        global,
    })
}

/// Which part of a command a delimited field belongs to
#[derive(Clone, Copy)]
enum Part {
    Regex,
    Replacement,
}

/// Read up to the first unescaped `delim`, returning the field and the text
/// after the delimiter.
///
/// An escaped delimiter stands for the delimiter itself: in a regex it is
/// escaped so it matches literally (`s|a\|b|X|` matches `a|b`), in a
/// replacement the backslash is left for [`translate_replacement`].
fn read_delimited(text: &str, delim: char, part: Part) -> Option<(String, &str)> {
    let mut field = String::new();
    let mut chars = text.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some((_, next)) if next == delim && matches!(part, Part::Regex) => {
                    field.push_str(&regex::escape(next.encode_utf8(&mut [0; 4])));
                }
                Some((_, next)) => {
                    field.push('\\');
                    field.push(next);
                }
                None => field.push('\\'),
            }
        } else if c == delim {
            return Some((field, &text[i + c.len_utf8()..]));
        } else {
            field.push(c);
        }
    }

    None
}

/// Rewrite a sed replacement into `regex` crate replacement syntax:
/// `&` is the whole match, `\1`..`\9` are groups, `\&` is a literal `&`,
/// `\n` a newline, and a bare `$` stays literal.
fn translate_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    out.push(d);
                    out.push('}');
                }
                Some('n') => out.push('\n'),
                Some('$') => out.push_str("$$"),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            '&' => out.push_str("${0}"),
            '$' => out.push_str("$$"),
            _ => out.push(c),
        }
    }

    out
}
