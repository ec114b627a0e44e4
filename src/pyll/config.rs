//! Configuration loader
//!
//! `defaults/pyll.default.toml` is embedded into the binary, so the shipped defaults and the
//! documented ones never drift apart. User files and single-key overrides are layered on top
//! through [`Loader`] before deserializing into [`PyllConfig`].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;

use crate::pyll::lexing::LexerOptions;

const DEFAULT_TOML: &str = include_str!("../../defaults/pyll.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct PyllConfig {
    pub lexer: LexerConfig,
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexerConfig {
    pub strict_indentation: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub token_format: TokenFormat,
}

/// How token listings are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    /// One `<type,lexeme,line,col>` tuple per line
    Simple,
    Json,
    Yaml,
}

impl PyllConfig {
    pub fn lexer_options(&self) -> LexerOptions {
        LexerOptions {
            strict_indentation: self.lexer.strict_indentation,
        }
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. A missing file is an error at [`build`](Self::build) time.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override a single dotted key, e.g. `lexer.strict_indentation`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<PyllConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<PyllConfig, ConfigError> {
    Loader::new().build()
}
