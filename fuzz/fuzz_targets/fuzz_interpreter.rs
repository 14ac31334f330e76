#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pawk::{Interpreter, Parser};
use std::io::{BufReader, Cursor};

#[derive(Arbitrary, Debug)]
struct Case<'a> {
    program: &'a str,
    field_separator: &'a str,
    input: &'a str,
}

fuzz_target!(|case: Case<'_>| {
    if case.program.len() > 10000 || case.input.len() > 100000 {
        return;
    }

    let ast = match Parser::new(case.program).parse() {
        Ok(a) => a,
        Err(_) => return,
    };

    let mut interpreter = Interpreter::new(&ast);
    interpreter.set_fs(case.field_separator);
    let mut output = Vec::new();
    let _ = interpreter.run(vec![BufReader::new(Cursor::new(case.input))], &mut output);
});
