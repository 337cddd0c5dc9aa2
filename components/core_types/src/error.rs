//! Error types shared by the pipeline stages.
//!
//! Tokenization failures are fatal and surface as [`LexError`]. Syntax errors
//! never abort parsing; each one is recorded as a [`Diagnostic`].

use crate::SourcePosition;
use serde::Serialize;
use thiserror::Error;

/// A fatal tokenization failure.
///
/// No partial token stream is produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A typographic quote (U+201C or U+201D) was used where a string
    /// delimiter was expected
    #[error(
        "unexpected smart quote at {position}: replace with ASCII quotation marks (U+0022) as string delimiter instead of U+201C and U+201D"
    )]
    SmartQuote {
        /// Where the quote was found
        position: SourcePosition,
    },

    /// An integer literal does not fit in 64 unsigned bits
    #[error("integer literal {literal} at {position} is too large")]
    IntegerOverflow {
        /// The digits as written
        literal: String,
        /// Where the literal starts
        position: SourcePosition,
    },
}

impl LexError {
    /// Source position the error refers to
    pub fn position(&self) -> SourcePosition {
        match self {
            LexError::SmartQuote { position } => *position,
            LexError::IntegerOverflow { position, .. } => *position,
        }
    }
}

/// The kind of syntax error a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A token did not fit the construct being parsed
    UnexpectedToken,
    /// The token stream ended in the middle of a construct
    UnexpectedEnd,
    /// A type position held something other than a known type
    InvalidType,
    /// Blocks or parentheses nested past the parser's limit
    NestingTooDeep,
}

/// A recorded, non-fatal syntax error.
///
/// # Examples
///
/// ```
/// use core_types::{Diagnostic, DiagnosticKind};
///
/// let diagnostic = Diagnostic {
///     kind: DiagnosticKind::UnexpectedEnd,
///     message: "unexpected end of input".to_string(),
///     position: None,
/// };
///
/// assert_eq!(diagnostic.to_string(), "unexpected end of input");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{}{}", position_prefix(.position), .message)]
pub struct Diagnostic {
    /// The type of error
    pub kind: DiagnosticKind,
    /// Human-readable error message
    pub message: String,
    /// Position of the offending token, when the parser was given positions
    pub position: Option<SourcePosition>,
}

/// `line:column: ` when a position is known, else nothing
fn position_prefix(position: &Option<SourcePosition>) -> String {
    match position {
        Some(position) => format!("{}: ", position),
        None => String::new(),
    }
}
