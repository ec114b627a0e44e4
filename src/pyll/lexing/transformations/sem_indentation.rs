//! Semantic indentation transformation
//!
//! Turns the raw logos stream into the final token sequence. Line starts are compared
//! against a stack of open indentation columns to synthesize INDENT and DEDENT tokens, words
//! are split into keywords and identifiers, and operators and punctuation get their terminal
//! names. All open levels are closed at the end of input, followed by a single EOF.

use crate::pyll::error::{LexError, Location};
use crate::pyll::lexing::base_tokenization::RawToken;
use crate::pyll::lexing::location::LocationTracker;
use crate::pyll::lexing::tables;
use crate::pyll::lexing::tokens::{
    Token, DEDENT, EOF, IDENTIFIER, INDENT, INTEGER, MALFORMED_STRING, STRING,
};
use crate::pyll::lexing::LexerOptions;

/// Open indentation columns, strictly increasing from a base of 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStack {
    levels: Vec<usize>,
}

impl IndentStack {
    pub fn new() -> Self {
        Self { levels: vec![0] }
    }

    pub fn top(&self) -> usize {
        *self.levels.last().unwrap_or(&0)
    }

    /// Number of open blocks above the base level.
    pub fn open_blocks(&self) -> usize {
        self.levels.len() - 1
    }

    /// Compare a line's indentation with the innermost open block and emit the block
    /// boundaries it implies at `location`, the line's first token.
    ///
    /// A dedent landing between two open levels closes the deeper ones and is otherwise
    /// tolerated unless `strict` is set.
    pub fn align(
        &mut self,
        indent: usize,
        location: Location,
        tokens: &mut Vec<Token>,
        strict: bool,
    ) -> Result<(), LexError> {
        if indent > self.top() {
            self.levels.push(indent);
            tokens.push(Token::new(INDENT, location));
            return Ok(());
        }

        while self.top() > indent {
            self.levels.pop();
            tokens.push(Token::new(DEDENT, location));
        }

        if self.top() != indent {
            if strict {
                return Err(LexError::InconsistentDedent { indent, location });
            }
            tracing::warn!(
                line = location.line,
                column = location.column,
                "dedent to column {} matches no enclosing block",
                indent
            );
        }
        Ok(())
    }

    /// Close every open block, emitting one DEDENT per level at `location`.
    pub fn close_all(&mut self, location: Location, tokens: &mut Vec<Token>) {
        while self.levels.len() > 1 {
            self.levels.pop();
            tokens.push(Token::new(DEDENT, location));
        }
    }
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform raw tokens into the final token sequence.
///
/// Lines holding no raw token (blank or comment-only lines) never reach the indentation
/// check. The indentation of any other line is the column of its first token minus one.
pub fn sem_indentation(
    source: &str,
    raw: Vec<(RawToken, logos::Span)>,
    options: &LexerOptions,
) -> Result<Vec<Token>, LexError> {
    let mut locations = LocationTracker::new(source);
    let mut stack = IndentStack::new();
    let mut tokens = Vec::with_capacity(raw.len() + 1);
    let mut at_line_start = true;

    for (raw_token, span) in raw {
        if raw_token == RawToken::Newline {
            at_line_start = true;
            continue;
        }

        let location = locations.location(span.start);
        if at_line_start {
            stack.align(
                location.column - 1,
                location,
                &mut tokens,
                options.strict_indentation,
            )?;
            at_line_start = false;
        }

        tokens.push(classify(raw_token, &source[span], location)?);
    }

    let end = locations.end();
    stack.close_all(end, &mut tokens);
    tokens.push(Token::new(EOF, end));

    Ok(tokens)
}

fn classify(raw: RawToken, text: &str, location: Location) -> Result<Token, LexError> {
    let token = match raw {
        RawToken::Word => match tables::keyword(text) {
            Some(keyword) => Token::new(keyword, location),
            None => Token::with_lexeme(IDENTIFIER, text, location),
        },
        RawToken::Integer => Token::with_lexeme(INTEGER, text, location),
        RawToken::Str => Token::with_lexeme(STRING, text, location),
        RawToken::UnterminatedStr => {
            tracing::warn!(
                line = location.line,
                column = location.column,
                "unterminated string literal"
            );
            Token::with_lexeme(MALFORMED_STRING, text, location)
        }
        RawToken::Operator | RawToken::Punctuation => {
            match tables::operator(text).or_else(|| tables::punctuation(text)) {
                Some(kind) => Token::new(kind, location),
                None => {
                    return Err(LexError::UnrecognizedCharacter {
                        ch: text.chars().next().unwrap_or('\u{FFFD}'),
                        location,
                    })
                }
            }
        }
        RawToken::Newline => unreachable!("newlines are consumed by the line loop"),
    };
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pyll::lexing::base_tokenization::tokenize;

    fn transform(source: &str, strict: bool) -> Result<Vec<Token>, LexError> {
        let raw = tokenize(source)?;
        sem_indentation(
            source,
            raw,
            &LexerOptions {
                strict_indentation: strict,
            },
        )
    }

    fn kinds(source: &str) -> Vec<&'static str> {
        transform(source, false)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_stack_push_and_pop() {
        let mut stack = IndentStack::new();
        let mut out = Vec::new();
        stack.align(4, Location::new(2, 5), &mut out, true).unwrap();
        stack.align(8, Location::new(3, 9), &mut out, true).unwrap();
        assert_eq!(stack.open_blocks(), 2);

        stack.align(0, Location::new(4, 1), &mut out, true).unwrap();
        assert_eq!(stack.top(), 0);
        let kinds: Vec<_> = out.iter().map(|token| token.kind).collect();
        assert_eq!(kinds, vec![INDENT, INDENT, DEDENT, DEDENT]);
        assert!(out[2..].iter().all(|t| t.location() == Location::new(4, 1)));
    }

    #[test]
    fn test_equal_indentation_emits_nothing() {
        assert_eq!(kinds("a\nb"), vec![IDENTIFIER, IDENTIFIER, EOF]);
    }

    #[test]
    fn test_blank_and_comment_lines_are_ignored() {
        let source = "if a:\n    b\n\n        # deep comment\n   \n    c\n";
        assert_eq!(
            kinds(source),
            vec![
                "if",
                IDENTIFIER,
                "tk_dos_puntos",
                INDENT,
                IDENTIFIER,
                IDENTIFIER,
                DEDENT,
                EOF
            ]
        );
    }

    #[test]
    fn test_trailing_dedents_at_end_position() {
        let tokens = transform("def f():\n    pass\n", false).unwrap();
        let tail: Vec<_> = tokens[tokens.len() - 2..]
            .iter()
            .map(|t| (t.kind, t.line, t.column))
            .collect();
        assert_eq!(tail, vec![(DEDENT, 3, 1), (EOF, 3, 1)]);
    }

    #[test]
    fn test_inconsistent_dedent_is_tolerated_by_default() {
        let source = "if a:\n        b\n    c\n";
        assert_eq!(
            kinds(source),
            vec![
                "if",
                IDENTIFIER,
                "tk_dos_puntos",
                INDENT,
                IDENTIFIER,
                DEDENT,
                IDENTIFIER,
                EOF
            ]
        );
    }

    #[test]
    fn test_inconsistent_dedent_fails_when_strict() {
        let err = transform("if a:\n        b\n    c\n", true).unwrap_err();
        assert_eq!(
            err,
            LexError::InconsistentDedent {
                indent: 4,
                location: Location::new(3, 5),
            }
        );
    }

    #[test]
    fn test_keywords_carry_no_lexeme() {
        let tokens = transform("while x", false).unwrap();
        assert_eq!(tokens[0], Token::new("while", Location::new(1, 1)));
        assert_eq!(
            tokens[1],
            Token::with_lexeme(IDENTIFIER, "x", Location::new(1, 7))
        );
    }

    #[test]
    fn test_malformed_string_keeps_scanning() {
        let tokens = transform("x = \"abc\ny = 1", false).unwrap();
        assert_eq!(
            tokens[2],
            Token::with_lexeme(MALFORMED_STRING, "\"abc", Location::new(1, 5))
        );
        assert_eq!(tokens[3].kind, IDENTIFIER);
        assert_eq!(tokens[3].location(), Location::new(2, 1));
    }

    #[test]
    fn test_long_single_line() {
        let body = vec!["7"; 50_000].join(",");
        let source = format!("x = [{body}]");
        let tokens = transform(&source, false).unwrap();

        assert_eq!(tokens.len(), 3 + 50_000 + 49_999 + 2);
        let close = &tokens[tokens.len() - 2];
        assert_eq!(close.kind, "tk_cor_der");
        assert_eq!(close.location(), Location::new(1, source.len()));
        assert_eq!(tokens[tokens.len() - 1].location(), Location::new(1, source.len() + 1));
    }
}
