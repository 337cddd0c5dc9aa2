//! Parser diagnostic constructors

use crate::lexer::Token;
use core_types::{Diagnostic, DiagnosticKind, SourcePosition};

/// Create a syntax diagnostic of the given kind
pub fn syntax_error(
    kind: DiagnosticKind,
    message: impl Into<String>,
    position: Option<SourcePosition>,
) -> Diagnostic {
    Diagnostic {
        kind,
        message: message.into(),
        position,
    }
}

/// Create an unexpected token diagnostic.
///
/// Running into the end marker produces an [`DiagnosticKind::UnexpectedEnd`]
/// diagnostic instead.
pub fn unexpected_token(expected: &str, got: &Token, position: Option<SourcePosition>) -> Diagnostic {
    if *got == Token::EOF {
        return unexpected_eof(expected, position);
    }
    syntax_error(
        DiagnosticKind::UnexpectedToken,
        format!("expected {}, found {}", expected, got),
        position,
    )
}

/// Create an unexpected end of input diagnostic
pub fn unexpected_eof(expected: &str, position: Option<SourcePosition>) -> Diagnostic {
    syntax_error(
        DiagnosticKind::UnexpectedEnd,
        format!("expected {}, found end of input", expected),
        position,
    )
}

/// Create a diagnostic for a type position holding something else
pub fn invalid_type(got: &Token, position: Option<SourcePosition>) -> Diagnostic {
    if *got == Token::EOF {
        return unexpected_eof("type annotation", position);
    }
    syntax_error(
        DiagnosticKind::InvalidType,
        format!("expected type annotation (Int, Bool or String), found {}", got),
        position,
    )
}

/// Create a diagnostic for a block or parenthesis nested past `limit`
pub fn nesting_too_deep(limit: usize, position: Option<SourcePosition>) -> Diagnostic {
    syntax_error(
        DiagnosticKind::NestingTooDeep,
        format!("nesting too deep: more than {} levels of blocks and parentheses", limit),
        position,
    )
}
