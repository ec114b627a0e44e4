//! # pyll
//!
//! An indentation-aware lexer and an LL(1) predictive parser for a small subset of Python.
//!
//! Source text is turned into a flat token stream with synthesized INDENT, DEDENT and EOF
//! tokens ([`pyll::lexing`]). The parser is driven by a declarative grammar table
//! ([`pyll::grammar`]) whose FIRST, FOLLOW and PREDICT sets are computed at startup
//! ([`pyll::sets`]). Parsing only accepts or rejects: no syntax tree is built.
//!
//! ```text
//! let tokens = pyll::pyll::tokenize("a = 10")?;
//! pyll::pyll::parse(&tokens)?;
//! ```

pub mod pyll;
