//! Command-line interface for pyll
//! This binary lexes and checks Python-subset source files and prints the shipped grammar.
//!
//! Usage:
//!   pyll tokens `<path>` [--format `<format>`]  - Print the token stream
//!   pyll check `<path>`                        - Lex and parse, report the first error
//!   pyll grammar [--sets]                    - Print the grammar and optionally its parse sets

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use pyll::pyll::config::{Loader, PyllConfig, TokenFormat};
use pyll::pyll::grammar::python_subset::python_subset;
use pyll::pyll::lexing::tokenize_with;
use pyll::pyll::parsing::python_subset_sets;
use pyll::pyll::processor::{check_file, format_tokens, read_source};
use pyll::pyll::Result;

#[derive(Debug, Parser)]
#[command(name = "pyll", version, about = "Lexer and LL(1) parser for a Python subset")]
struct PyllArgs {
    /// Configuration file layered over the defaults and ./pyll.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reject dedents that match no enclosing block
    #[arg(long, global = true)]
    strict_indentation: bool,

    #[command(subcommand)]
    command: PyllCommand,
}

#[derive(Debug, Subcommand)]
enum PyllCommand {
    /// Print the token stream of a source file
    Tokens {
        path: PathBuf,

        /// Output format (defaults to the configured one)
        #[arg(long, short)]
        format: Option<TokenFormat>,
    },

    /// Lex and parse a source file
    Check { path: PathBuf },

    /// Print the shipped grammar
    Grammar {
        /// Also print FIRST, FOLLOW and PREDICT sets
        #[arg(long)]
        sets: bool,
    },
}

fn main() {
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = PyllArgs::parse();
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let outcome = match &args.command {
        PyllCommand::Tokens { path, format } => handle_tokens_command(path, *format, &config),
        PyllCommand::Check { path } => handle_check_command(path, &config),
        PyllCommand::Grammar { sets } => {
            handle_grammar_command(*sets);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        process::exit(1);
    }
}

/// Picked up from the working directory when present.
const LOCAL_CONFIG: &str = "pyll.toml";

fn load_config(args: &PyllArgs) -> Result<PyllConfig> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    if args.strict_indentation {
        loader = loader.set_override("lexer.strict_indentation", true)?;
    }
    Ok(loader.build()?)
}

fn handle_tokens_command(
    path: &Path,
    format: Option<TokenFormat>,
    config: &PyllConfig,
) -> Result<()> {
    let source = read_source(path)?;
    let tokens = tokenize_with(&source, &config.lexer_options())?;
    let format = format.unwrap_or(config.output.token_format);
    print!("{}", format_tokens(&tokens, format)?);
    Ok(())
}

fn handle_check_command(path: &Path, config: &PyllConfig) -> Result<()> {
    let count = check_file(path, config)?;
    println!(
        "{}: syntax analysis finished successfully ({} tokens)",
        path.display(),
        count
    );
    Ok(())
}

fn handle_grammar_command(with_sets: bool) {
    let grammar = python_subset();
    print!("{}", grammar);
    if !with_sets {
        return;
    }

    let sets = python_subset_sets();
    println!();
    for nt in grammar.nonterminals() {
        let first = sets.first(nt);
        let epsilon = if first.nullable { " ε" } else { "" };
        println!(
            "FIRST(<{}>) = {{ {}{} }}",
            grammar.name(nt),
            join(&first.terminals),
            epsilon
        );
    }

    println!();
    for nt in grammar.nonterminals() {
        println!(
            "FOLLOW(<{}>) = {{ {} }}",
            grammar.name(nt),
            join(sets.follow(nt))
        );
    }

    println!();
    for nt in grammar.nonterminals() {
        for (idx, production) in grammar.productions(nt).iter().enumerate() {
            println!(
                "PREDICT(<{}> ::= {}) = {{ {} }}",
                grammar.name(nt),
                grammar.production_to_string(production),
                join(sets.predict(nt, idx))
            );
        }
    }

    let conflicts = sets.conflicts();
    println!();
    if conflicts.is_empty() {
        println!("No LL(1) conflicts");
    }
    for conflict in conflicts {
        println!(
            "Conflict in <{}> between alternatives {} and {} on {{ {} }}",
            grammar.name(conflict.nonterminal),
            conflict.first + 1,
            conflict.second + 1,
            join(&conflict.terminals)
        );
    }
}

fn join(terminals: &BTreeSet<&str>) -> String {
    terminals.iter().copied().collect::<Vec<_>>().join(" ")
}
