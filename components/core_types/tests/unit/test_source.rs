//! Unit tests for SourcePosition

use core_types::SourcePosition;

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = SourcePosition {
            line: 10,
            column: 5,
            offset: 150,
        };

        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 150);
    }

    #[test]
    fn test_source_position_start() {
        let pos = SourcePosition::start();

        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_source_position_display() {
        assert_eq!(SourcePosition::new(12, 3, 99).to_string(), "12:3");
    }

    #[test]
    fn test_source_position_is_copy() {
        let pos = SourcePosition::new(2, 2, 5);
        let copy = pos;
        assert_eq!(pos, copy);
    }

    #[test]
    fn test_source_position_serializes_fields() {
        let json = serde_json::to_value(SourcePosition::new(4, 8, 30)).unwrap();
        assert_eq!(json["line"], 4);
        assert_eq!(json["column"], 8);
        assert_eq!(json["offset"], 30);
    }
}
