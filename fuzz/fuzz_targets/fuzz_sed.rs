#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pawk::Editor;
use std::io::{BufReader, Cursor};

#[derive(Arbitrary, Debug)]
struct Case<'a> {
    script: &'a str,
    quiet: bool,
    input: &'a str,
}

fuzz_target!(|case: Case<'_>| {
    let editor = match Editor::new(case.script) {
        Ok(e) => e.quiet(case.quiet),
        Err(_) => return,
    };

    let mut output = Vec::new();
    let _ = editor.run(vec![BufReader::new(Cursor::new(case.input))], &mut output);
});
