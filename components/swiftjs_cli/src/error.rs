//! Error types for the CLI

use core_types::LexError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Source could not be tokenized
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    /// File I/O error
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// REPL error
    #[error("REPL error: {0}")]
    Repl(String),

    /// Source discovery failed
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// AST could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard input is a terminal rather than piped data
    #[error("no input received; pipe Swift-subset code into stdin")]
    NoInput,

    /// Compilation finished but reported syntax errors
    #[error("{count} syntax error(s)")]
    Diagnostics {
        /// Number of diagnostics reported
        count: usize,
    },
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
