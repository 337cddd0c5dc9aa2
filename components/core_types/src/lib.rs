//! Shared types for the SwiftJS transpiler.
//!
//! This crate provides the foundational types used by every stage of the
//! pipeline: source locations, the lexical error type, and the non-fatal
//! syntax diagnostics accumulated by the parser.
//!
//! # Overview
//!
//! - [`SourcePosition`] - Source code location
//! - [`LexError`] - Fatal tokenization failure
//! - [`Diagnostic`] - Recorded syntax error
//! - [`DiagnosticKind`] - Category of a syntax error
//!
//! # Examples
//!
//! ```
//! use core_types::{Diagnostic, DiagnosticKind, SourcePosition};
//!
//! let diagnostic = Diagnostic {
//!     kind: DiagnosticKind::UnexpectedToken,
//!     message: "expected identifier after 'var', found '='".to_string(),
//!     position: Some(SourcePosition::new(1, 5, 4)),
//! };
//!
//! assert_eq!(diagnostic.to_string(), "1:5: expected identifier after 'var', found '='");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{Diagnostic, DiagnosticKind, LexError};
pub use source::SourcePosition;
