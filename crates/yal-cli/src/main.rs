//! `yal` command-line front end.
//!
//! Scans and parses a source file, then prints the token stream or the
//! syntax tree as JSON on stdout. Diagnostics go to stderr.

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser as ClapParser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use yal_lexer::{Lexer, Span};
use yal_parser::{Parser, SyntaxError};

/// Lexer and parser front end for yal
#[derive(Debug, ClapParser)]
#[command(name = "yal")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Source file to read, or `-` for stdin
    input: String,

    /// Print the token stream instead of the syntax tree
    #[arg(long)]
    tokens: bool,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn directive_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn read_source(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Error reading stdin")?;
        return Ok(source);
    }
    fs::read_to_string(input).with_context(|| format!("Error reading file '{input}'"))
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

/// Render the offending source line with a caret under the error column.
fn snippet(source: &str, span: Span) -> Option<String> {
    let line = source.lines().nth(span.line.checked_sub(1)?)?;
    let pad = " ".repeat(span.column.saturating_sub(1));
    Some(format!("  {line}\n  {pad}^"))
}

fn report(source: &str, err: &SyntaxError) {
    eprintln!("{err}");
    if let Some(snippet) = snippet(source, err.span()) {
        eprintln!("{snippet}");
    }
}

/// Returns `Ok(false)` when the source has a syntax error that was already reported.
fn run(cli: &Cli) -> Result<bool> {
    let source = read_source(&cli.input)?;
    info!(input = %cli.input, bytes = source.len(), "read source");

    let tokens = match Lexer::new(&source).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            report(&source, &SyntaxError::from(e));
            return Ok(false);
        }
    };

    if cli.tokens {
        println!("{}", to_json(&tokens, cli.compact)?);
        return Ok(true);
    }

    let program = match Parser::new(tokens).parse() {
        Ok(program) => program,
        Err(e) => {
            report(&source, &SyntaxError::from(e));
            return Ok(false);
        }
    };
    debug!(statements = program.statements.len(), "parsed program");

    println!("{}", to_json(&program, cli.compact)?);
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
