//! Main module for pyll library functionality

pub mod config;
pub mod error;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod sets;

pub use error::{Error, LexError, Location, ParseError, Result};
pub use lexing::{tokenize, tokenize_with, LexerOptions, Token};
pub use parsing::{parse, PredictiveParser};
