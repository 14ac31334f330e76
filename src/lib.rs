//! pawk - a compact pattern-action record interpreter
//!
//! A program is one optional `BEGIN { ... }` block, one `pattern { action }`
//! rule and one optional `END { ... }` block. The program text is parsed
//! once; the rule then runs against every input line while a single
//! [`Context`] carries the record, its fields, the record number and the
//! accumulated variables from BEGIN through END.
//!
//! # Example
//!
//! ```
//! use pawk::{Interpreter, Parser};
//! use std::io::BufReader;
//!
//! let program = Parser::new("{ sum += $2 } END { print sum }").parse().unwrap();
//!
//! let mut interpreter = Interpreter::new(&program);
//! let input = b"apples 3\npears 4\n";
//! let mut output = Vec::new();
//! interpreter.run(vec![BufReader::new(&input[..])], &mut output).unwrap();
//!
//! assert_eq!(String::from_utf8(output).unwrap(), "7\n");
//! ```
//!
//! # Field Processing Example
//!
//! ```
//! use pawk::{Interpreter, Parser};
//! use std::io::BufReader;
//!
//! let program = Parser::new("{ print $1, $2 }").parse().unwrap();
//!
//! let mut interpreter = Interpreter::new(&program);
//! interpreter.set_fs(",");  // Use comma as field separator
//!
//! let input = b"hello,world\nfoo,bar\n";
//! let mut output = Vec::new();
//! interpreter.run(vec![BufReader::new(&input[..])], &mut output).unwrap();
//!
//! assert_eq!(String::from_utf8(output).unwrap(), "hello world\nfoo bar\n");
//! ```
//!
//! # Pattern Matching Example
//!
//! ```
//! use pawk::{Interpreter, Parser};
//! use std::io::BufReader;
//!
//! let program = Parser::new("/error/ { print $2 }").parse().unwrap();
//!
//! let mut interpreter = Interpreter::new(&program);
//! let input = b"info ok\nerror failed\ninfo done\n";
//! let mut output = Vec::new();
//! interpreter.run(vec![BufReader::new(&input[..])], &mut output).unwrap();
//!
//! assert_eq!(String::from_utf8(output).unwrap(), "failed\n");
//! ```
//!
//! # Stream Editing Example
//!
//! ```
//! use pawk::Editor;
//! use std::io::BufReader;
//!
//! let editor = Editor::new("s/cat/dog/g").unwrap();
//! let mut output = Vec::new();
//! editor.run(vec![BufReader::new(&b"cat and cat\n"[..])], &mut output).unwrap();
//!
//! assert_eq!(String::from_utf8(output).unwrap(), "dog and dog\n");
//! ```

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod sed;
pub mod value;

pub use ast::Program;
pub use error::{Error, Result};
pub use interpreter::{Context, Interpreter, RunState};
pub use parser::Parser;
pub use sed::Editor;
