//! Error types shared by the lexer, the grammar engine and the predictive parser
//!
//! Lexical and syntactic failures are reported through the same location-tagged channel:
//! every variant that refers to source text exposes a [`Location`], and its `Display` form
//! starts with `<line,column>`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.line, self.column)
    }
}

/// Failures raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{location} lexical error: unrecognized character {ch:?}")]
    UnrecognizedCharacter { ch: char, location: Location },

    /// Only raised when strict indentation is enabled.
    #[error("{location} lexical error: dedent to column {indent} matches no enclosing block")]
    InconsistentDedent { indent: usize, location: Location },
}

impl LexError {
    pub fn location(&self) -> Location {
        match self {
            LexError::UnrecognizedCharacter { location, .. }
            | LexError::InconsistentDedent { location, .. } => *location,
        }
    }
}

/// Failures raised while building a [`Grammar`](crate::pyll::grammar::Grammar) from a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("start symbol '{0}' is not a nonterminal of the grammar")]
    UnknownStartSymbol(String),

    #[error("nonterminal '{0}' is defined more than once")]
    DuplicateNonTerminal(String),

    #[error("nonterminal '{0}' has no productions")]
    NoProductions(String),
}

/// The first failure met by the predictive parser. Parsing stops there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A terminal required by the selected production did not match the current token.
    #[error("{location} syntax error: found {found}; expected {expected}")]
    Mismatch {
        expected: String,
        found: String,
        location: Location,
    },

    /// The current token is in no PREDICT set of the nonterminal being expanded.
    #[error(
        "{location} syntax error: found {found} while parsing <{nonterminal}>; expected one of: {}",
        .expected.join(", ")
    )]
    NoProduction {
        nonterminal: String,
        expected: Vec<String>,
        found: String,
        location: Location,
    },

    /// The start symbol was fully derived but input remains.
    #[error("{location} syntax error: unexpected trailing input {found}; expected end of input")]
    TrailingInput { found: String, location: Location },

    /// The parser reached a string literal the lexer could not close.
    #[error("{location} lexical error: unterminated string literal {lexeme}")]
    MalformedString { lexeme: String, location: Location },

    #[error("{location} syntax error: nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize, location: Location },
}

impl ParseError {
    pub fn location(&self) -> Location {
        match self {
            ParseError::Mismatch { location, .. }
            | ParseError::NoProduction { location, .. }
            | ParseError::TrailingInput { location, .. }
            | ParseError::MalformedString { location, .. }
            | ParseError::NestingTooDeep { location, .. } => *location,
        }
    }

    /// Whether this failure originates in the lexical domain.
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::MalformedString { .. })
    }
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialization error: {0}")]
    Serialize(String),
}

impl Error {
    /// Source position of lexical and syntax errors; `None` for everything else.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Lex(err) => Some(err.location()),
            Error::Parse(err) => Some(err.location()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
