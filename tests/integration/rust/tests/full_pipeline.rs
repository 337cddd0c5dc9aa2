//! Full Pipeline Integration Tests
//!
//! Tests the complete flow: Source -> Lexer -> Tokens -> Parser -> AST -> CodeGenerator -> JavaScript
//! This is the most critical integration test suite.

use core_types::DiagnosticKind;
use transpiler::{generate, parse_program, tokenize, BinaryOperator, Expression, Statement};

/// Helper function to run the three entry points over `source`
fn compile(source: &str) -> Result<String, String> {
    let tokens = tokenize(source).map_err(|e| format!("Lex error: {}", e))?;
    let (statements, diagnostics) = parse_program(tokens);
    if !diagnostics.is_empty() {
        return Err(format!("Syntax errors: {:?}", diagnostics));
    }
    Ok(generate(&statements))
}

fn single_expression(source: &str) -> Expression {
    let (mut statements, diagnostics) = parse_program(tokenize(source).unwrap());
    assert!(diagnostics.is_empty());
    assert_eq!(statements.len(), 1);
    match statements.remove(0) {
        Statement::ExpressionStatement { expression } => expression,
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

/// Test: var maps to a mutable binding
#[test]
fn test_full_pipeline_var() {
    assert_eq!(compile("var x = 2;").unwrap(), "let x = 2;");
}

/// Test: let maps to an immutable binding
#[test]
fn test_full_pipeline_let() {
    assert_eq!(compile("let x = 2;").unwrap(), "const x = 2;");
}

/// Test: multiplication binds tighter than addition
#[test]
fn test_full_pipeline_precedence() {
    assert_eq!(
        single_expression("1 + 2 * 3;"),
        Expression::binary(
            Expression::int(1),
            BinaryOperator::Add,
            Expression::binary(Expression::int(2), BinaryOperator::Mul, Expression::int(3)),
        )
    );
}

/// Test: parentheses override precedence
#[test]
fn test_full_pipeline_parentheses() {
    assert_eq!(
        single_expression("(1 + 2) * 3;"),
        Expression::binary(
            Expression::binary(Expression::int(1), BinaryOperator::Add, Expression::int(2)),
            BinaryOperator::Mul,
            Expression::int(3),
        )
    );
}

/// Test: the trailing terminator is optional at end of input and before `}`
#[test]
fn test_full_pipeline_optional_terminator() {
    let with = parse_program(tokenize("print 1;").unwrap());
    let without = parse_program(tokenize("print 1").unwrap());
    assert_eq!(with, without);

    let with = parse_program(tokenize("func f() { print 1; }").unwrap());
    let without = parse_program(tokenize("func f() { print 1 }").unwrap());
    assert_eq!(with, without);
}

/// Test: a broken declaration is dropped and parsing terminates
#[test]
fn test_full_pipeline_recovery_terminates() {
    let (statements, diagnostics) = parse_program(tokenize("var = 5;").unwrap());
    assert!(statements.is_empty());
    assert!(!diagnostics.is_empty());
}

/// Test: the tail expression becomes a return only with a return type
#[test]
fn test_full_pipeline_tail_return() {
    assert_eq!(
        compile("func add(x: Int, y: Int) -> Int { x + y }").unwrap(),
        "function add(x, y) {\n  return (x + y);\n}"
    );
    assert_eq!(
        compile("func add(x: Int, y: Int) { x + y }").unwrap(),
        "function add(x, y) {\n  (x + y);\n}"
    );
}

/// Test: quote, backslash, newline and tab are all re-escaped
#[test]
fn test_full_pipeline_string_escaping() {
    assert_eq!(
        compile(r#"print "q\" b\\ n\n t\t";"#).unwrap(),
        r#"console.log("q\" b\\ n\n t\t");"#
    );
}

/// Test: tokenization is pure
#[test]
fn test_full_pipeline_tokenize_is_pure() {
    let source = "class A { var x: Int = 1; func f() -> Int { x * 2 } }";
    assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
}

/// Test: unknown characters are dropped
#[test]
fn test_full_pipeline_unknown_characters_skipped() {
    assert!(compile("var x = 1 # 2;").unwrap_err().contains("Syntax"));
    assert_eq!(compile("print @1;").unwrap(), "console.log(1);");
}

/// Test: a mixed program with every statement form
#[test]
fn test_full_pipeline_mixed_program() {
    let source = "\
class Greeter {
    let greeting: String = \"hello\";
    func greet(name: String) -> String { name; }
}
var count = 0;
count = count + 1;
print count;
count / 2;";
    let expected = "\
class Greeter {
  greeting = \"hello\";
  greet(name) {
    return name;
  }
}
let count = 0;
count = (count + 1);
console.log(count);
(count / 2);";
    assert_eq!(compile(source).unwrap(), expected);
}

/// Test: several errors reported in one pass
#[test]
fn test_full_pipeline_multiple_diagnostics() {
    let source = "var = 1; let y: Float = 2; print 3; let z = ;";
    let (statements, diagnostics) = parse_program(tokenize(source).unwrap());
    assert_eq!(statements.len(), 1);
    let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::UnexpectedToken,
            DiagnosticKind::InvalidType,
            DiagnosticKind::UnexpectedToken,
        ]
    );
}
