#![no_main]

use libfuzzer_sys::fuzz_target;
use pawk::Parser;

fuzz_target!(|data: &str| {
    // Any program text must parse or fail cleanly, never panic
    let _ = Parser::new(data).parse();
});
