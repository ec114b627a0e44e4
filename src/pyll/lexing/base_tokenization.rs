//! Base tokenization using the logos lexer library
//!
//! This is the entry point where a source string becomes a raw token stream. Raw tokens are
//! purely lexical: words are not yet split into keywords and identifiers, operators are not
//! yet named, and no indentation tokens exist. Horizontal whitespace and comments are skipped
//! here; newlines are kept because the indentation transformation works line by line.

use logos::Logos;

use super::classify::{is_alnum, is_digit};
use super::location::SourceMap;
use crate::pyll::error::LexError;

/// Raw lexical classes recognized by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+|#[^\n]*")]
pub enum RawToken {
    #[token("\n")]
    Newline,

    /// Identifier or keyword: a letter or underscore, then the longest alphanumeric run.
    #[regex(r"[A-Za-z_]", |lex| consume_while(lex, is_alnum))]
    Word,

    /// Unsigned decimal integer. No floats, no exponents.
    #[regex(r"[0-9]", |lex| consume_while(lex, is_digit))]
    Integer,

    /// Quoted string closed on the same line. No escape sequences.
    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    Str,

    /// Quoted string that runs into the end of its line or of the input.
    #[regex(r#""[^"\n]*"#)]
    #[regex(r"'[^'\n]*")]
    UnterminatedStr,

    /// Two-character operators win over one-character ones by longest match.
    #[regex(r"\*\*|//|<<|>>|[-+*/%&|^=!<>]=|[-+*/%&|^~<>=]")]
    Operator,

    #[regex(r"[()\[\]{},:;.]")]
    Punctuation,
}

fn consume_while(lex: &mut logos::Lexer<RawToken>, pred: fn(char) -> bool) -> bool {
    let len: usize = lex
        .remainder()
        .chars()
        .take_while(|ch| pred(*ch))
        .map(char::len_utf8)
        .sum();
    lex.bump(len);
    true
}

/// Tokenize source code with byte spans.
///
/// Stops at the first character logos cannot match and reports it with its position.
pub fn tokenize(source: &str) -> Result<Vec<(RawToken, logos::Span)>, LexError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                let ch = source[span.start..].chars().next().unwrap_or('\u{FFFD}');
                return Err(LexError::UnrecognizedCharacter {
                    ch,
                    location: SourceMap::new(source).location(span.start),
                });
            }
        }
    }

    Ok(tokens)
}
