use crate::ast::*;
use crate::error::{Error, Result};

const ASSIGN_OPS: [BinaryOp; 4] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div];

/// Names maintained by the interpreter; they can be read but not assigned
const READ_ONLY: [&str; 2] = ["NR", "NF"];

/// Compile a `{ ... }` block.
///
/// Statements inside the braces are separated by `;` or newlines. An empty
/// body compiles to an action that does nothing.
pub(crate) fn parse_action(text: &str) -> Result<Action> {
    let text = text.trim();
    let body = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| Error::missing_braces(text))?;

    let statements = body
        .split([';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_statement)
        .collect::<Result<Vec<_>>>()?;

    Ok(Action::new(statements))
}

fn parse_statement(text: &str) -> Result<Stmt> {
    if let Some(args) = text.strip_prefix("print")
        && !args.starts_with(is_name_char)
    {
        return parse_print(args, text);
    }

    if let Some((idx, op)) = find_assign_op(text) {
        let var = text[..idx].trim();
        if !is_identifier(var) || READ_ONLY.contains(&var) {
            return Err(Error::unsupported_statement(text));
        }
        let right = parse_expression(&text[idx + op.assign_token().len()..])?;
        return Ok(Stmt::Assign {
            var: var.to_string(),
            value: Expr::Binary {
                left: Box::new(Expr::Var(var.to_string())),
                op,
                right: Box::new(right),
            },
        });
    }

    Err(Error::unsupported_statement(text))
}

/// Parse the argument list following the `print` keyword
fn parse_print(args: &str, stmt: &str) -> Result<Stmt> {
    let args = args.trim();
    if args.is_empty() || args == "$0" {
        return Ok(Stmt::Print { fields: Vec::new() });
    }

    let fields = args
        .split(',')
        .map(|arg| {
            let arg = arg.trim();
            if arg.starts_with('$') {
                parse_field_index(arg).map(FieldRef::Field)
            } else if is_identifier(arg) {
                Ok(FieldRef::Var(arg.to_string()))
            } else {
                Err(Error::unsupported_statement(stmt))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Stmt::Print { fields })
}

/// Compile the right-hand side of an accumulate statement.
///
/// Anything that is not a field reference is taken as a variable name,
/// numeric-looking text included.
fn parse_expression(text: &str) -> Result<Expr> {
    let text = text.trim();
    if text.starts_with('$') {
        return parse_field_index(text).map(Expr::Field);
    }
    Ok(Expr::Var(text.to_string()))
}

fn parse_field_index(text: &str) -> Result<usize> {
    text[1..]
        .parse::<usize>()
        .map_err(|_| Error::invalid_field(text))
}

/// Leftmost compound assignment operator in `text`
fn find_assign_op(text: &str) -> Option<(usize, BinaryOp)> {
    ASSIGN_OPS
        .iter()
        .filter_map(|&op| text.find(op.assign_token()).map(|idx| (idx, op)))
        .min_by_key(|&(idx, _)| idx)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_') && chars.all(is_name_char)
}
