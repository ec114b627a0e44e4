//! Static lexical tables
//!
//! Keywords, operators and punctuation are process-wide immutable tables, built once on first
//! use. A keyword's terminal type is the keyword itself; operators and punctuation map to the
//! `tk_*` terminal names used by the grammar.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::tokens::TokenType;

/// Reserved words. Builtin names and constants are reserved as well, so `range`, `print`,
/// `sum` or `pi` never lex as identifiers.
pub static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // statements and operators
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield", "print",
        // numeric and collection types
        "int", "float", "complex", "bool", "list", "tuple", "range", "dict", "set", "frozenset",
        "bytes", "bytearray", "memoryview", "Complex", "Real", "Rational", "Integral", "Number",
        "Union",
        // math functions and constants
        "abs", "divmod", "pow", "round", "sum", "acos", "acosh", "asin", "asinh", "atan",
        "atan2", "atanh", "cos", "cosh", "sin", "sinh", "tan", "tanh", "exp", "log", "log10",
        "log1p", "log2", "ceil", "floor", "trunc", "radians", "degrees", "e", "pi", "tau", "inf",
        "nan",
        // read-only numeric properties
        "denominator", "imag", "numerator", "real",
        // constants
        "True", "False", "None",
        // exceptions
        "Exception", "ValueError", "TypeError", "KeyError", "IndexError", "AttributeError",
        "ZeroDivisionError", "FileNotFoundError",
    ]
    .into_iter()
    .collect()
});

/// Operator spellings of one or two characters.
pub static OPERATORS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    HashMap::from([
        ("+", "tk_suma"),
        ("-", "tk_resta"),
        ("*", "tk_mult"),
        ("/", "tk_div"),
        ("//", "tk_div_entera"),
        ("%", "tk_mod"),
        ("**", "tk_pot"),
        ("&", "tk_and_bin"),
        ("|", "tk_or_bin"),
        ("^", "tk_xor_bin"),
        ("~", "tk_not_bin"),
        ("<<", "tk_despl_izq"),
        (">>", "tk_despl_der"),
        ("=", "tk_asign"),
        ("+=", "tk_suma_asig"),
        ("-=", "tk_resta_asig"),
        ("*=", "tk_mult_asig"),
        ("/=", "tk_div_asig"),
        ("%=", "tk_mod_asig"),
        ("&=", "tk_and_bin_asig"),
        ("|=", "tk_or_bin_asig"),
        ("^=", "tk_xor_bin_asig"),
        ("==", "tk_igual"),
        ("!=", "tk_dif"),
        ("<", "tk_menor"),
        (">", "tk_mayor"),
        ("<=", "tk_menor_igual"),
        (">=", "tk_mayor_igual"),
    ])
});

pub static PUNCTUATION: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    HashMap::from([
        ("(", "tk_par_izq"),
        (")", "tk_par_der"),
        ("[", "tk_cor_izq"),
        ("]", "tk_cor_der"),
        ("{", "tk_llave_izq"),
        ("}", "tk_llave_der"),
        (",", "tk_coma"),
        (":", "tk_dos_puntos"),
        (";", "tk_punto_coma"),
        (".", "tk_punto"),
    ])
});

/// The terminal type of a reserved word, or `None` for an identifier.
pub fn keyword(word: &str) -> Option<TokenType> {
    KEYWORDS.get(word).copied()
}

pub fn operator(text: &str) -> Option<TokenType> {
    OPERATORS.get(text).copied()
}

pub fn punctuation(text: &str) -> Option<TokenType> {
    PUNCTUATION.get(text).copied()
}
