//! Unit tests for LexError and Diagnostic

use core_types::{Diagnostic, DiagnosticKind, LexError, SourcePosition};

#[cfg(test)]
mod lex_error_tests {
    use super::*;

    #[test]
    fn test_smart_quote_position() {
        let err = LexError::SmartQuote {
            position: SourcePosition::new(3, 1, 20),
        };
        assert_eq!(err.position(), SourcePosition::new(3, 1, 20));
    }

    #[test]
    fn test_smart_quote_message() {
        let err = LexError::SmartQuote {
            position: SourcePosition::start(),
        };
        let message = err.to_string();
        assert!(message.contains("smart quote"));
        assert!(message.contains("U+201C"));
        assert!(message.contains("U+201D"));
    }

    #[test]
    fn test_integer_overflow_message() {
        let err = LexError::IntegerOverflow {
            literal: "99999999999999999999999".to_string(),
            position: SourcePosition::new(1, 9, 8),
        };
        assert!(err.to_string().contains("99999999999999999999999"));
        assert_eq!(err.position().column, 9);
    }

    #[test]
    fn test_lex_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&LexError::SmartQuote {
            position: SourcePosition::start(),
        });
    }
}

#[cfg(test)]
mod diagnostic_tests {
    use super::*;

    #[test]
    fn test_diagnostic_display_with_position() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::UnexpectedToken,
            message: "expected expression, found ';'".to_string(),
            position: Some(SourcePosition::new(2, 4, 10)),
        };
        assert_eq!(diagnostic.to_string(), "2:4: expected expression, found ';'");
    }

    #[test]
    fn test_diagnostic_is_std_error() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::NestingTooDeep,
            message: "nesting too deep".to_string(),
            position: Some(SourcePosition::new(1, 300, 299)),
        };
        let boxed: Box<dyn std::error::Error> = Box::new(diagnostic);
        assert_eq!(boxed.to_string(), "1:300: nesting too deep");
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_diagnostic_kinds_are_distinct() {
        assert_ne!(DiagnosticKind::UnexpectedToken, DiagnosticKind::UnexpectedEnd);
        assert_ne!(DiagnosticKind::UnexpectedEnd, DiagnosticKind::InvalidType);
    }

    #[test]
    fn test_diagnostic_serializes_kind() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::InvalidType,
            message: "unknown type 'Float'".to_string(),
            position: None,
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "InvalidType");
        assert!(json["position"].is_null());
    }
}
