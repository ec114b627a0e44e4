//! File processing API
//!
//! Reads source files, renders token listings and runs the full lex-then-parse check with a
//! loaded [`PyllConfig`]. Everything the binary does goes through here.

use std::fs;
use std::io;
use std::path::Path;

use crate::pyll::config::{PyllConfig, TokenFormat};
use crate::pyll::error::{Error, Result};
use crate::pyll::lexing::{tokenize_with, Token};
use crate::pyll::parsing::PredictiveParser;

/// Read a source file, reporting a missing file separately from other I/O failures.
pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })
}

pub fn format_tokens(tokens: &[Token], format: TokenFormat) -> Result<String> {
    match format {
        TokenFormat::Simple => Ok(tokens
            .iter()
            .map(|token| format!("{}\n", token))
            .collect()),
        TokenFormat::Json => Ok(serde_json::to_string_pretty(tokens)?),
        TokenFormat::Yaml => Ok(serde_yaml::to_string(tokens)?),
    }
}

/// Lex `source` and parse it with the shipped grammar. Returns the number of tokens accepted.
pub fn check_source(source: &str, config: &PyllConfig) -> Result<usize> {
    let tokens = tokenize_with(source, &config.lexer_options())?;
    PredictiveParser::python_subset()
        .with_max_depth(config.parser.max_depth)
        .parse(&tokens)?;
    Ok(tokens.len())
}

pub fn check_file(path: impl AsRef<Path>, config: &PyllConfig) -> Result<usize> {
    let path = path.as_ref();
    let source = read_source(path)?;
    let count = check_source(&source, config)?;
    tracing::info!(path = %path.display(), tokens = count, "source accepted");
    Ok(count)
}
