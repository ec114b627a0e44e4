//! Token type produced by the lexer and consumed by the parser
//!
//! A token's type is a terminal name. Keywords use the keyword itself, operators and
//! punctuation use their `tk_*` names from [`tables`](super::tables), and the remaining
//! terminals are the constants below.

use std::fmt;

use serde::Serialize;

use crate::pyll::error::Location;

/// A terminal symbol name.
pub type TokenType = &'static str;

pub const IDENTIFIER: TokenType = "id";
pub const INTEGER: TokenType = "tk_entero";
pub const STRING: TokenType = "tk_cadena";
/// A string literal that reached the end of its line without a closing quote.
pub const MALFORMED_STRING: TokenType = "tk_cadena_erronea";
pub const INDENT: TokenType = "INDENT";
pub const DEDENT: TokenType = "DEDENT";
pub const EOF: TokenType = "EOF";

/// One lexed token. `line`/`column` mark its first character (1-based).
///
/// Identifiers, literals and malformed strings carry their raw text; every other token type
/// identifies itself fully and carries no lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenType,
    pub lexeme: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenType, location: Location) -> Self {
        Self {
            kind,
            lexeme: None,
            line: location.line,
            column: location.column,
        }
    }

    pub fn with_lexeme(kind: TokenType, lexeme: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            lexeme: Some(lexeme.into()),
            line: location.line,
            column: location.column,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }

    /// The text used to show this token in diagnostics: its lexeme when it has one, else its type.
    pub fn text(&self) -> &str {
        self.lexeme.as_deref().unwrap_or(self.kind)
    }

    /// Type and literal text for diagnostics: `tk_entero(6)`, or just `INDENT` without a lexeme.
    pub fn describe(&self) -> String {
        match &self.lexeme {
            Some(lexeme) => format!("{}({})", self.kind, lexeme),
            None => self.kind.to_string(),
        }
    }
}

/// `<type,lexeme,line,column>`, with an empty lexeme field for lexeme-less tokens.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{},{},{},{}>",
            self.kind,
            self.lexeme.as_deref().unwrap_or(""),
            self.line,
            self.column
        )
    }
}
