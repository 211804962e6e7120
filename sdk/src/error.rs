use thiserror::Error;
use vcl_parser::SyntaxError;

use std::fmt::Display;

/// Recoverable data-shape errors. Decoding continues past each one and the
/// affected field keeps its default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Too many \"{block_type}\" blocks for a singular field: found {count}")]
    TooManyBlocks { block_type: String, count: usize },

    #[error("Missing required block \"{block_type}\"")]
    MissingBlock { block_type: String },

    #[error("Missing required attribute \"{name}\"")]
    MissingAttribute { name: String },

    #[error("Block \"{block_type}\" declares {expected} label(s) but has {found}")]
    MissingLabels {
        block_type: String,
        expected:   usize,
        found:      usize,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Syntax errors: {}", join(.0))]
    Syntax(Vec<SyntaxError>),

    #[error("Decode errors: {}", join(.0))]
    Decode(Vec<DecodeError>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join<E: Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
