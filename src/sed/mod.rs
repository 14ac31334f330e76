//! Stream editor: one command compiled once, then applied to every line.

mod command;

use std::borrow::Cow;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Error, Result};

pub use command::{Address, Command, CommandKind, parse_command};

/// A compiled stream-editing command plus its output mode
#[derive(Debug, Clone)]
pub struct Editor {
    command: Command,
    quiet: bool,
}

impl Editor {
    pub fn new(script: &str) -> Result<Self> {
        let command = parse_command(script)?;
        debug!(?command, "parsed editor command");
        Ok(Self {
            command,
            quiet: false,
        })
    }

    /// Suppress the automatic print of every line (`-n`)
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Lines produced for one input line, in output order
    pub fn edit_line<'l>(&self, line: &'l str, line_number: usize) -> Vec<Cow<'l, str>> {
        let selected = self.command.address.matches(line, line_number);
        let mut out = Vec::with_capacity(2);

        let line: Cow<'l, str> = match &self.command.kind {
            CommandKind::Substitute {
                regex,
                replacement,
                global,
            } if selected => {
                if *global {
                    regex.replace_all(line, replacement.as_str())
                } else {
                    regex.replace(line, replacement.as_str())
                }
            }
            CommandKind::Delete if selected => return out,
            CommandKind::Print if selected => {
                out.push(Cow::Borrowed(line));
                Cow::Borrowed(line)
            }
            _ => Cow::Borrowed(line),
        };

        if !self.quiet {
            out.push(line);
        }
        out
    }

    /// Edit `inputs` as one stream, writing results as each line is read
    pub fn run<R: BufRead, W: Write>(&self, inputs: Vec<R>, output: &mut W) -> Result<usize> {
        let mut line_number = 0;
        let mut buf = Vec::new();

        for mut input in inputs {
            loop {
                buf.clear();
                if input.read_until(b'\n', &mut buf).map_err(Error::Io)? == 0 {
                    break;
                }
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }

                line_number += 1;
                let line = String::from_utf8_lossy(&buf);
                for edited in self.edit_line(&line, line_number) {
                    writeln!(output, "{}", edited).map_err(Error::Io)?;
                }
            }
        }

        output.flush().map_err(Error::Io)?;
        debug!(lines = line_number, "editing finished");
        Ok(line_number)
    }

    /// Edit a fully buffered set of lines; used for in-place editing, where
    /// nothing is written back until every line has been processed
    pub fn apply<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .enumerate()
            .flat_map(|(i, line)| {
                self.edit_line(line.as_ref(), i + 1)
                    .into_iter()
                    .map(Cow::into_owned)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
