//! CLI support for jsonq
//!
//! Provides programmatic access to the jsonq CLI functionality for embedding
//! in other tools.

mod docs;
mod execute;

pub use docs::{get_doc_category, get_docs_overview, DocCategory};
pub use execute::{execute, Command, RunOptions, RunResult};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Query compilation error
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'jsonq docs' to see available categories.")]
    UnknownCategory(String),
}
