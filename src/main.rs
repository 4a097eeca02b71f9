// cpptopy: C++ subset to Python translator

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::style::Stylize;
use tracing::Level;

use cpptopy::config::DEFAULT_INDENT_WIDTH;
use cpptopy::parser::ast::SourceLocation;
use cpptopy::{translate_file, TranslateError, TranslatorConfig};

#[derive(ClapParser, Debug)]
#[command(name = "cpptopy")]
#[command(version)]
#[command(about = "Translate a small C++ subset into Python 3", long_about = None)]
struct Args {
    /// C++ source file to translate
    input: PathBuf,

    /// Python file to write
    output: PathBuf,

    /// Spaces per indentation level in the generated Python (at least 1)
    #[arg(long, default_value_t = DEFAULT_INDENT_WIDTH)]
    indent_width: NonZeroUsize,

    /// Omit the header comment line
    #[arg(long)]
    no_header: bool,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = TranslatorConfig {
        indent_width: args.indent_width,
        emit_header: !args.no_header,
    };

    match translate_file(&args.input, &args.output, &config) {
        Ok(()) => {
            println!("Translation complete. Wrote {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e, &args.input);
            ExitCode::FAILURE
        }
    }
}

/// Print `e` to stderr, with the offending source line when it has a position
fn report(e: &TranslateError, input: &Path) {
    eprintln!("{} {}", "error:".red().bold(), e);

    let Some(location) = e.location() else {
        return;
    };
    if let Ok(source) = fs::read_to_string(input) {
        if let Some(snippet) = snippet(&source, location) {
            eprintln!("{}", snippet);
        }
    }
}

/// Source line at `location` with a caret under its column
fn snippet(source: &str, location: SourceLocation) -> Option<String> {
    let line = source.lines().nth(location.line.checked_sub(1)?)?;
    let gutter = format!("{:>4} | ", location.line);
    let caret = format!(
        "{:width$}{}",
        "",
        "^".red().bold(),
        width = gutter.len() + location.column.saturating_sub(1)
    );
    // Columns count a tab as one character
    Some(format!("{}{}\n{}", gutter, line.replace('\t', " "), caret))
}
