//! Character classes used by the scanner
//!
//! The classes are ASCII-only: identifiers are `[A-Za-z_][A-Za-z0-9_]*` and integer literals
//! are `[0-9]+`. Any other character outside a string or comment is unrecognized.

/// `0`..=`9`
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// ASCII letter or underscore, the characters an identifier may start with.
pub fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Letter, digit or underscore.
pub fn is_alnum(ch: char) -> bool {
    is_alpha(ch) || is_digit(ch)
}
