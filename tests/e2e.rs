//! End-to-end tests for pawk
//!
//! These tests run complete programs and verify the output matches expected results.

use std::io::{self, BufReader, Cursor, Write};

use pawk::{Error, Interpreter, Parser};

/// Run a program with the given input and return the output
fn run_pawk(program: &str, input: &str) -> Result<String, String> {
    run_pawk_with_fs(program, input, " ")
}

/// Run a program with a custom field separator
fn run_pawk_with_fs(program: &str, input: &str, fs: &str) -> Result<String, String> {
    let ast = Parser::new(program).parse().map_err(|e| e.to_string())?;

    let mut interpreter = Interpreter::new(&ast);
    interpreter.set_fs(fs);
    let mut output = Vec::new();

    if input.is_empty() {
        let inputs: Vec<BufReader<Cursor<&str>>> = vec![];
        interpreter.run(inputs, &mut output).map_err(|e| e.to_string())?;
    } else {
        let inputs = vec![BufReader::new(Cursor::new(input))];
        interpreter.run(inputs, &mut output).map_err(|e| e.to_string())?;
    }

    String::from_utf8(output).map_err(|e| e.to_string())
}

// ============================================================================
// Whole-record printing
// ============================================================================

#[test]
fn test_print_is_identity() {
    let input = "first line\n  indented\tand tabbed  \n\nlast";
    let output = run_pawk("{ print }", input).unwrap();
    assert_eq!(output, "first line\n  indented\tand tabbed  \n\nlast\n");
}

#[test]
fn test_print_dollar_zero_is_identity() {
    let output = run_pawk("{ print $0 }", "a  b\nc\n").unwrap();
    assert_eq!(output, "a  b\nc\n");
}

#[test]
fn test_empty_input() {
    let output = run_pawk("{ print }", "").unwrap();
    assert_eq!(output, "");
}

#[test]
fn test_empty_action_prints_nothing() {
    let output = run_pawk("/a/ {}", "a\nb\n").unwrap();
    assert_eq!(output, "");
}

// ============================================================================
// Patterns
// ============================================================================

#[test]
fn test_regex_substring_match() {
    let output = run_pawk("/abc/", "xxabcxx\nab c\nabc\nABC\n").unwrap();
    assert_eq!(output, "xxabcxx\nabc\n");
}

#[test]
fn test_regex_with_action() {
    let output = run_pawk("/^[0-9]+$/ { print $1 }", "12\nx1\n7\n").unwrap();
    assert_eq!(output, "12\n7\n");
}

#[test]
fn test_line_number_matches_once() {
    let input = "l1\nl2\nl3\nl4\nl5\n";
    assert_eq!(run_pawk("NR==3", input).unwrap(), "l3\n");
    assert_eq!(run_pawk("NR==1 { print $1 }", input).unwrap(), "l1\n");
}

#[test]
fn test_line_number_out_of_range() {
    let input = "l1\nl2\n";
    assert_eq!(run_pawk("NR==0", input).unwrap(), "");
    assert_eq!(run_pawk("NR==3", input).unwrap(), "");
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_default_separator_collapses_whitespace() {
    let output = run_pawk("{ print $2, NF }", "a   b  c").unwrap();
    assert_eq!(output, "b 3\n");
}

#[test]
fn test_literal_separator_keeps_empty_fields() {
    let output = run_pawk_with_fs("{ print $1, $2, $3, NF }", "a,,b", ",").unwrap();
    assert_eq!(output, "a  b 3\n");
}

#[test]
fn test_tab_separator() {
    let output = run_pawk_with_fs("{ print $2 }", "a b\tc d", "\t").unwrap();
    assert_eq!(output, "c d\n");
}

#[test]
fn test_out_of_range_field() {
    let output = run_pawk("{ print $7 }", "a b").unwrap();
    assert_eq!(output, "\n");
}

// ============================================================================
// Accumulation
// ============================================================================

#[test]
fn test_sum_column() {
    let output = run_pawk("{ sum+=$1 } END { print sum }", "3\n4 x\nabc").unwrap();
    assert_eq!(output, "7\n");
}

#[test]
fn test_sum_fractions() {
    let output = run_pawk("{ total += $2 } END { print total }", "a 1.5\nb 2.25\n").unwrap();
    assert_eq!(output, "3.75\n");
}

#[test]
fn test_large_sum_prints_in_exponent_form() {
    let output = run_pawk("{ s += $1 } END { print s }", "600000\n400000\n").unwrap();
    assert_eq!(output, "1e+06\n");
    let output = run_pawk("{ s += $1 } END { print s }", "999999\n").unwrap();
    assert_eq!(output, "999999\n");
}

#[test]
fn test_count_matches() {
    let output = run_pawk("/err/ { n += NR } END { print n, NR }", "err\nok\nerr\n").unwrap();
    assert_eq!(output, "4 3\n");
}

#[test]
fn test_unset_variable_prints_zero() {
    let output = run_pawk("END { print never }", "x\n").unwrap();
    assert_eq!(output, "0\n");
}

#[test]
fn test_numeric_literal_reads_as_unset_variable() {
    let output = run_pawk("{ n += 1 } END { print n }", "a\nb\n").unwrap();
    assert_eq!(output, "0\n");
}

#[test]
fn test_variables_shared_between_begin_rule_and_end() {
    let program = "BEGIN { base += x } { base += $1 } END { print base }";
    let ast = Parser::new(program).parse().unwrap();
    let mut interpreter = Interpreter::new(&ast);
    interpreter.set_variable("x", "100");
    let mut output = Vec::new();
    interpreter
        .run(vec![BufReader::new(Cursor::new("1\n2\n"))], &mut output)
        .unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "103\n");
}

#[test]
fn test_compound_operators() {
    let program = "{ p += $1; p *= $2; p -= $3 } END { print p }";
    let output = run_pawk(program, "2 5 1\n").unwrap();
    assert_eq!(output, "9\n");
}

#[test]
fn test_division_by_zero_yields_zero() {
    let output = run_pawk("{ q += $1; q /= $2 } END { print q }", "10 0\n").unwrap();
    assert_eq!(output, "0\n");
}

#[test]
fn test_multiple_statements() {
    let output = run_pawk("{ n += $1; print n }", "1\n2\n3\n").unwrap();
    assert_eq!(output, "1\n3\n6\n");
}

// ============================================================================
// BEGIN / END
// ============================================================================

#[test]
fn test_begin_only_reads_no_fields() {
    let output = run_pawk("BEGIN { print $1, NR }", "ignored\n").unwrap();
    assert_eq!(output, " 0\n");
}

#[test]
fn test_begin_runs_before_input() {
    let output = run_pawk("BEGIN { print } { print $1 }", "a b\n").unwrap();
    assert_eq!(output, "\na\n");
}

#[test]
fn test_end_sees_last_record() {
    let output = run_pawk("END { print $0 }", "one\ntwo\n").unwrap();
    assert_eq!(output, "two\n");
}

#[test]
fn test_end_with_no_input() {
    let output = run_pawk("END { print NR }", "").unwrap();
    assert_eq!(output, "0\n");
}

#[test]
fn test_multiple_inputs_form_one_stream() {
    let ast = Parser::new("{ print NR, $1 } END { print NR }").parse().unwrap();
    let mut interpreter = Interpreter::new(&ast);
    let mut output = Vec::new();
    let inputs = vec![
        BufReader::new(Cursor::new("a\nb\n")),
        BufReader::new(Cursor::new("c\n")),
    ];
    interpreter.run(inputs, &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "1 a\n2 b\n3 c\n3\n");
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_rerun_is_identical() {
    let program = "NR==2 { s += $2 } END { print s }";
    let input = "a 1\nb 2\nc 3\n";
    let first = run_pawk(program, input).unwrap();
    let second = run_pawk(program, input).unwrap();
    assert_eq!(first, "2\n");
    assert_eq!(first, second);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_action_fails_before_output() {
    let result = run_pawk("{ print", "a\nb\n");
    assert!(result.is_err());
}

#[test]
fn test_parse_errors() {
    let cases = [
        ("", "syntax error"),
        ("BEGIN { print", "BEGIN"),
        ("/abc { print }", "missing closing `/`"),
        ("/(/ { print }", "invalid regex"),
        ("NR==x { print }", "invalid line number"),
        ("{ print $y }", "invalid field"),
        ("{ x = 1 }", "unsupported statement"),
        ("{ print } END", "braces"),
    ];
    for (program, expected) in cases {
        let err = run_pawk(program, "line\n").unwrap_err();
        assert!(
            err.contains(expected),
            "program {:?}: error {:?} does not mention {:?}",
            program,
            err,
            expected
        );
    }
}

#[test]
fn test_invalid_utf8_line_keeps_run_going() {
    let ast = Parser::new("{ print $1; n += $2 } END { print n }").parse().unwrap();
    let mut interpreter = Interpreter::new(&ast);
    let input: &[u8] = b"ok 1\ncaf\xe9 2\nafter 3\n";
    let mut output = Vec::new();
    interpreter.run(vec![BufReader::new(input)], &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "ok\ncaf\u{FFFD}\nafter\n6\n"
    );
}

/// A writer that fails after accepting `remaining` lines
struct FailingWriter {
    written: Vec<u8>,
    remaining: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        if buf.contains(&b'\n') {
            self.remaining -= 1;
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_output_error_aborts_run() {
    let ast = Parser::new("{ print } END { print NR }").parse().unwrap();
    let mut interpreter = Interpreter::new(&ast);
    let mut output = FailingWriter {
        written: Vec::new(),
        remaining: 2,
    };
    let result = interpreter.run(vec![BufReader::new(Cursor::new("a\nb\nc\nd\n"))], &mut output);

    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(String::from_utf8(output.written).unwrap(), "a\nb\n");
    assert_eq!(interpreter.context().record_number, 3);
}
