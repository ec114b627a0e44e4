//! Token stream transformations applied after base tokenization

pub mod sem_indentation;

pub use sem_indentation::{sem_indentation, IndentStack};
