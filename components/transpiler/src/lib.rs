//! Swift subset to JavaScript transpiler
//!
//! Provides the three pipeline stages and the AST they exchange.
//!
//! # Overview
//!
//! - [`Lexer`] - Tokenizes source text into [`Token`]s
//! - [`Parser`] - Recursive descent parser with error recovery, producing
//!   [`Statement`]s and [`Diagnostic`]s
//! - [`CodeGenerator`] - Renders statements as JavaScript
//! - [`AstPrinter`] - Indented tree dump of the AST
//!
//! # Example
//!
//! ```
//! use transpiler::{generate, parse_program, tokenize};
//!
//! let tokens = tokenize("let x = 1 + 2;").unwrap();
//! let (statements, diagnostics) = parse_program(tokens);
//! assert!(diagnostics.is_empty());
//! assert_eq!(generate(&statements), "const x = (1 + 2);");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ast;
pub mod ast_printer;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOperator, Expression, Parameter, Statement, TypeAnnotation, VariableKind};
pub use ast_printer::AstPrinter;
pub use codegen::{generate, CodeGenerator};
pub use core_types::{Diagnostic, DiagnosticKind, LexError, SourcePosition};
pub use lexer::{tokenize, Keyword, Lexer, Punctuator, SpannedToken, Token};
pub use parser::{parse_program, Parser};

/// Result of running the whole pipeline over one source text
#[derive(Debug, Clone, PartialEq)]
pub struct Transpiled {
    /// Generated JavaScript, without a trailing newline
    pub output: String,
    /// Parsed statements
    pub statements: Vec<Statement>,
    /// Syntax diagnostics, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl Transpiled {
    /// True if parsing produced no diagnostics
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Tokenize, parse and generate `source` with the default generator.
///
/// Tokens carry positions, so statements may end at a line break and
/// diagnostics report where they occurred. Only a lexical error aborts;
/// syntax errors are collected and the recovered statements are still
/// generated.
pub fn transpile(source: &str) -> Result<Transpiled, LexError> {
    transpile_with(source, &CodeGenerator::new())
}

/// Like [`transpile`], rendering with the given generator
pub fn transpile_with(source: &str, generator: &CodeGenerator) -> Result<Transpiled, LexError> {
    let tokens = Lexer::new(source).tokenize_spanned()?;
    let (statements, diagnostics) = Parser::with_positions(tokens).parse_program();
    let output = generator.generate(&statements);
    Ok(Transpiled {
        output,
        statements,
        diagnostics,
    })
}
