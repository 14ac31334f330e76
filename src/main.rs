use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use pawk::{Interpreter, Parser};

const EXAMPLES: &str = r#"Examples:
  pawk '{ print $1 }' file.txt
  pawk -F: '{ print $1, $3 }' /etc/passwd
  pawk '/pattern/' file.txt
  pawk 'NR==5 { print }' file.txt
  pawk '{ sum += $1 } END { print sum }' numbers.txt"#;

#[derive(clap::Parser, Debug)]
#[command(
    name = "pawk",
    version,
    about = "Pattern scanning and text processing",
    after_help = EXAMPLES
)]
struct Cli {
    /// Field separator; a single space splits on runs of whitespace
    #[arg(short = 'F', long = "field-separator", default_value = " ", allow_hyphen_values = true)]
    field_separator: String,

    /// Assign a numeric variable before the program starts
    #[arg(short = 'v', value_name = "VAR=VAL")]
    assign: Vec<String>,

    /// Read the program from a file
    #[arg(short = 'f', value_name = "PROGFILE")]
    progfile: Option<PathBuf>,

    /// The program (unless -f is given), then input files; `-` is standard input
    #[arg(value_name = "ARGS")]
    args: Vec<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("pawk: {:#}", e);
        process::exit(2);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PAWK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut args = cli.args.into_iter();

    let program_source = match &cli.progfile {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read program file '{}'", path.display()))?,
        None => match args.next() {
            Some(source) => source,
            None => bail!("no program provided"),
        },
    };
    let input_files: Vec<String> = args.collect();

    let mut variables = Vec::with_capacity(cli.assign.len());
    for assignment in &cli.assign {
        match assignment.split_once('=') {
            Some((name, value)) => variables.push((name, value)),
            None => bail!("invalid variable assignment: {}", assignment),
        }
    }

    // Parse the program before touching any input
    let program = Parser::new(&program_source).parse()?;

    let mut interpreter = Interpreter::new(&program);
    interpreter.set_fs(&unescape_separator(&cli.field_separator));
    for (name, value) in variables {
        interpreter.set_variable(name, value);
    }

    let inputs = open_inputs(&input_files)?;

    let stdout = io::stdout();
    let mut output = stdout.lock();
    interpreter.run(inputs, &mut output)?;

    Ok(())
}

/// Open every input up front; no files means standard input
fn open_inputs(files: &[String]) -> Result<Vec<Box<dyn BufRead>>> {
    if files.is_empty() {
        return Ok(vec![Box::new(BufReader::new(io::stdin()))]);
    }

    files
        .iter()
        .map(|name| -> Result<Box<dyn BufRead>> {
            if name == "-" {
                Ok(Box::new(BufReader::new(io::stdin())))
            } else {
                let file = File::open(name).with_context(|| format!("cannot open '{}'", name))?;
                Ok(Box::new(BufReader::new(file)))
            }
        })
        .collect()
}

/// `-F '\t'` means a tab
fn unescape_separator(fs: &str) -> String {
    match fs {
        "\\t" => "\t".to_string(),
        other => other.to_string(),
    }
}
