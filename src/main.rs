use anyhow::{Context, Result};
use clap::{ArgAction, Parser as ClapParser, Subcommand, ValueEnum};
use pipa::lexer::{tokenize, Token};
use pipa::parser::{parse, Node, ParseOutcome};
use pipa::{printer, report};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "pipa")]
#[command(about = "Lexer and parser for the Pipa language", long_about = None)]
struct Cli {
    /// Log more (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the input file and print tokens
    Lex {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Append each token's location
        #[arg(short, long)]
        details: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Parse the input file and print the syntax tree
    Parse {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Parse the input file and print it back in canonical layout
    Fmt {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Lex {
            file,
            details,
            format,
        } => lex_file(&file, details, format),
        Commands::Parse { file, format } => parse_file(&file, format),
        Commands::Fmt { file } => format_file(&file),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_source(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read file '{}'", path.display()))?;
    debug!(path = %path.display(), bytes = source.len(), "read source");
    Ok(source)
}

/// Tokens of `source`, or the printed lexical report.
fn lex_source(source: &str) -> Option<Vec<Token>> {
    match tokenize(source) {
        Ok(tokens) => Some(tokens),
        Err(err) => {
            eprint!("{}", report::render_lex_error(source, &err));
            None
        }
    }
}

/// Parsed program, or the printed failure report.
///
/// With `partial`, a stray closing brace is only a warning and the statements
/// before it are kept; otherwise it fails like any other parse error.
fn parse_source(source: &str, tokens: &[Token], partial: bool) -> Option<Node> {
    match parse(tokens) {
        ParseOutcome::Success(program) => Some(program),
        ParseOutcome::ExtraTokens { program, at } if partial => {
            eprint!("{}", report::render_extra_tokens(source, tokens, at));
            Some(program)
        }
        ParseOutcome::ExtraTokens { at, .. } => {
            eprint!("{}", report::render_parse_failure(source, tokens, Some(at)));
            None
        }
        ParseOutcome::NoMatch { at } => {
            eprint!("{}", report::render_parse_failure(source, tokens, at));
            None
        }
        ParseOutcome::Unrecoverable { at, reason } => {
            eprint!("{}", report::render_unrecoverable(source, tokens, at, &reason));
            None
        }
    }
}

fn lex_file(path: &Path, details: bool, format: Format) -> Result<ExitCode> {
    let source = read_source(path)?;
    let Some(tokens) = lex_source(&source) else {
        return Ok(ExitCode::FAILURE);
    };

    match format {
        Format::Text => {
            for token in &tokens {
                println!("{}", printer::format_token(token, details));
            }
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(&tokens).context("failed to serialize tokens")?;
            println!("{json}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_file(path: &Path, format: Format) -> Result<ExitCode> {
    let source = read_source(path)?;
    let Some(tokens) = lex_source(&source) else {
        return Ok(ExitCode::FAILURE);
    };
    let Some(program) = parse_source(&source, &tokens, true) else {
        return Ok(ExitCode::FAILURE);
    };

    match format {
        Format::Text => print!("{}", printer::dump_tree(&program)),
        Format::Json => {
            let json = serde_json::to_string_pretty(&program).context("failed to serialize syntax tree")?;
            println!("{json}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn format_file(path: &Path) -> Result<ExitCode> {
    let source = read_source(path)?;
    let Some(tokens) = lex_source(&source) else {
        return Ok(ExitCode::FAILURE);
    };
    // The whole file must parse; a stray brace is an error here.
    let Some(program) = parse_source(&source, &tokens, false) else {
        return Ok(ExitCode::FAILURE);
    };

    print!("{}", printer::to_source(&program));
    Ok(ExitCode::SUCCESS)
}
