mod context;
mod expr;
mod stmt;

use std::collections::HashMap;
use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::ast::*;
use crate::error::{Error, Result};
use crate::value::parse_field_number;

pub use context::{Context, split_fields};

/// Lifecycle of an interpreter run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Created,
    Running,
    Finished,
}

/// The pawk interpreter runtime
pub struct Interpreter<'a> {
    /// The parsed program
    program: &'a Program,

    /// Field separator every run starts with
    fs: String,

    /// Variables assigned before execution (-v)
    presets: HashMap<String, f64>,

    /// State of the current (or last) run
    pub(crate) ctx: Context,

    state: RunState,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            fs: " ".to_string(),
            presets: HashMap::new(),
            ctx: Context::new(" "),
            state: RunState::Created,
        }
    }

    /// Set the field separator
    pub fn set_fs(&mut self, fs: &str) {
        self.fs = fs.to_string();
        self.ctx.field_separator = self.fs.clone();
    }

    /// Set a variable before execution; non-numeric text sets it to 0
    pub fn set_variable(&mut self, name: &str, value: &str) {
        let value = parse_field_number(value.trim());
        self.presets.insert(name.to_string(), value);
        self.ctx.set_variable(name, value);
    }

    /// The context of the current or most recent run
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the program over `inputs`, treated as one continuous stream of records.
    ///
    /// Every call starts from a fresh context, so running twice over the
    /// same input gives the same output.
    pub fn run<R: BufRead, W: Write>(&mut self, inputs: Vec<R>, output: &mut W) -> Result<()> {
        self.ctx = Context::with_variables(&self.fs, self.presets.clone());
        self.state = RunState::Running;
        debug!(fs = %self.fs, inputs = inputs.len(), "starting run");

        let result = self.run_program(inputs, output);

        self.state = RunState::Finished;
        debug!(records = self.ctx.record_number, ok = result.is_ok(), "run finished");
        result
    }

    fn run_program<R: BufRead, W: Write>(&mut self, inputs: Vec<R>, output: &mut W) -> Result<()> {
        let program = self.program;

        if let Some(begin) = &program.begin {
            self.execute_action(begin, output)?;
        }

        for input in inputs {
            self.process_input(input, output)?;
        }

        if let Some(end) = &program.end {
            self.execute_action(end, output)?;
        }

        Ok(())
    }

    fn process_input<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = input.read_until(b'\n', &mut buf).map_err(Error::Io)?;
            if bytes_read == 0 {
                break; // EOF
            }

            // Remove record separator
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }

            self.ctx.record_number += 1;
            // Bytes that are not UTF-8 become U+FFFD instead of ending the run
            self.ctx.set_record(&String::from_utf8_lossy(&buf));

            self.process_current_record(output)?;
        }

        Ok(())
    }

    /// Run the body rule against the current record
    fn process_current_record<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let program = self.program;
        let Some(rule) = &program.rule else {
            return Ok(());
        };

        if self.pattern_matches(&rule.pattern) {
            trace!(nr = self.ctx.record_number, "record matched");
            self.execute_action(&rule.action, output)?;
        }
        Ok(())
    }

    fn pattern_matches(&self, pattern: &Pattern) -> bool {
        match pattern {
            Pattern::Always => true,
            Pattern::Regex(regex) => regex.is_match(&self.ctx.current_line),
            Pattern::LineNumber(n) => i64::try_from(self.ctx.record_number) == Ok(*n),
        }
    }
}
