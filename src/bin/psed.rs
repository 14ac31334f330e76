use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser as _;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pawk::Editor;

const EXAMPLES: &str = r#"Commands:
  s/pattern/replacement/[g]  Substitute (& is the match, \1..\9 are groups)
  [address]d                 Delete lines
  [address]p                 Print lines
  An address is a line number or /regex/.

Examples:
  psed 's/foo/bar/' file.txt
  psed 's/foo/bar/g' file.txt
  psed '/pattern/d' file.txt
  psed '5d' file.txt
  psed -n '/pattern/p' file.txt
  psed -i 's/old/new/g' file.txt"#;

#[derive(clap::Parser, Debug)]
#[command(
    name = "psed",
    version,
    about = "Stream editor for filtering and transforming text",
    after_help = EXAMPLES
)]
struct Cli {
    /// Suppress automatic printing of every line
    #[arg(short = 'n', long = "quiet")]
    quiet: bool,

    /// Edit files in place
    #[arg(short = 'i', long = "in-place")]
    in_place: bool,

    /// Accepted for compatibility; patterns always use extended syntax
    #[arg(short = 'E', long = "extended")]
    extended: bool,

    /// The editing command
    command: String,

    /// Input files; standard input when none are given
    files: Vec<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("psed: {:#}", e);
        process::exit(2);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PSED_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    debug!(extended = cli.extended, in_place = cli.in_place, "options");
    let editor = Editor::new(&cli.command)?.quiet(cli.quiet);

    if cli.in_place {
        if cli.files.is_empty() {
            bail!("in-place editing requires at least one file");
        }
        for path in &cli.files {
            edit_in_place(&editor, path)?;
        }
        return Ok(());
    }

    let inputs: Vec<Box<dyn BufRead>> = if cli.files.is_empty() {
        vec![Box::new(BufReader::new(io::stdin()))]
    } else {
        cli.files
            .iter()
            .map(|path| -> Result<Box<dyn BufRead>> {
                let file = File::open(path)
                    .with_context(|| format!("cannot open '{}'", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            })
            .collect::<Result<_>>()?
    };

    let stdout = io::stdout();
    let mut output = stdout.lock();
    editor.run(inputs, &mut output)?;
    Ok(())
}

/// Edit every line of `path`, then write the result back in one go
fn edit_in_place(editor: &Editor, path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("cannot open '{}'", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = content.lines().collect();

    let mut edited = String::with_capacity(content.len());
    for line in editor.apply(&lines) {
        edited.push_str(&line);
        edited.push('\n');
    }

    fs::write(path, edited).with_context(|| format!("cannot write '{}'", path.display()))?;
    debug!(path = %path.display(), lines = lines.len(), "edited in place");
    Ok(())
}
