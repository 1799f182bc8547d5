use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use frontend::{
    ast::printer::to_source, errors::errors::Diagnostics, parse, render_error, ParseOptions,
};
use tracing::{debug, error};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// `(head child ...)`
    Sexpr,
    /// Indented source text
    Source,
}

/// Parses a source file and prints its syntax tree.
#[derive(Parser, Debug)]
#[command(name = "frontend", version, about)]
struct Cli {
    /// File to parse
    file: PathBuf,

    /// How to print the tree
    #[arg(long, value_enum, default_value = "sexpr")]
    format: Format,

    /// Spaces a leading tab counts for
    #[arg(long, default_value_t = 4)]
    tab_width: usize,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            error!(file = %cli.file.display(), "{}", err);
            return ExitCode::FAILURE;
        }
    };

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.file.display().to_string());

    let options = ParseOptions::new().with_tab_width(cli.tab_width);
    let mut diagnostics = Diagnostics::new();
    let tree = parse(&source, &file_name, &options, &mut diagnostics);

    for diagnostic in diagnostics.all() {
        eprintln!("{}", render_error(diagnostic, &source));
    }
    debug!(
        errors = diagnostics.errors().count(),
        warnings = diagnostics.warnings().count(),
        "parsed {}",
        file_name
    );

    match cli.format {
        Format::Sexpr => println!("{}", tree),
        Format::Source => print!("{}", to_source(&tree)),
    }

    if diagnostics.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
