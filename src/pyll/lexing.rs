//! Lexer
//!
//! This module orchestrates the tokenization pipeline for the Python subset.
//!
//! The pipeline consists of:
//! 1. Base tokenization using the logos lexer ([`base_tokenization`]): raw words, numbers,
//!    strings, operators, punctuation and newlines with byte spans. Whitespace and comments
//!    are dropped here.
//! 2. Semantic indentation ([`transformations::sem_indentation`]): line starts are compared
//!    against the indentation stack to synthesize INDENT and DEDENT tokens, words are
//!    classified against the keyword table, and an EOF token closes the stream.
//!
//! Indentation Handling
//!
//!     A line's indentation is the column of its first token minus one, so a tab counts as a
//!     single column. Lines that are blank or hold only a comment never open or close a block.
//!     Every INDENT and DEDENT is positioned at the first token of the line that caused it;
//!     the DEDENTs closing the blocks still open at end of input are positioned with EOF.

pub mod base_tokenization;
pub mod classify;
pub mod location;
pub mod tables;
pub mod tokens;
pub mod transformations;

pub use tokens::{Token, TokenType};

use crate::pyll::error::LexError;

/// Knobs for the indentation transformation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Fail on a dedent that matches no enclosing block instead of tolerating it.
    pub strict_indentation: bool,
}

/// Tokenize source text with the default (permissive) options.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with(source, &LexerOptions::default())
}

/// Tokenize source text.
///
/// The result always ends with exactly one EOF token. An unterminated string does not fail
/// here: it is emitted as a `tk_cadena_erronea` token and scanning continues on the next line.
pub fn tokenize_with(source: &str, options: &LexerOptions) -> Result<Vec<Token>, LexError> {
    let raw = base_tokenization::tokenize(source)?;
    let tokens = transformations::sem_indentation(source, raw, options)?;
    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::tokens::*;
    use super::*;
    use crate::pyll::error::Location;

    #[test]
    fn test_assignment() {
        let tokens = tokenize("a = 10").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::with_lexeme(IDENTIFIER, "a", Location::new(1, 1)),
                Token::new("tk_asign", Location::new(1, 3)),
                Token::with_lexeme(INTEGER, "10", Location::new(1, 5)),
                Token::new(EOF, Location::new(1, 7)),
            ]
        );
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        assert_eq!(
            tokenize("").unwrap(),
            vec![Token::new(EOF, Location::new(1, 1))]
        );
    }

    #[test]
    fn test_crlf_lines() {
        let kinds: Vec<_> = tokenize("if a:\r\n    pass\r\n")
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec!["if", IDENTIFIER, "tk_dos_puntos", INDENT, "pass", DEDENT, EOF]
        );
    }

    #[test]
    fn test_unrecognized_character_halts() {
        let err = tokenize("a = 1\nb = a ? 2\n").unwrap_err();
        assert_eq!(err.location(), Location::new(2, 7));
    }

    #[test]
    fn test_strict_option_is_forwarded() {
        let strict = LexerOptions {
            strict_indentation: true,
        };
        assert!(tokenize_with("if a:\n    b\n  c\n", &strict).is_err());
        assert!(tokenize("if a:\n    b\n  c\n").is_ok());
    }
}
