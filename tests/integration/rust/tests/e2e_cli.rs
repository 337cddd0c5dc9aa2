//! End-to-End CLI Integration Tests
//!
//! Tests the complete transpiler through the swiftjs_cli Session API.
//! This is the highest level integration test - source files to written output.

use std::fs;
use swiftjs_cli::build::run_build;
use swiftjs_cli::pipe::compile_piped;
use swiftjs_cli::repl::evaluate;
use swiftjs_cli::{AstFormat, BuildOptions, CliError, Session};
use tempfile::TempDir;

/// Test: Session output matches the crate-level pipeline
#[test]
fn test_e2e_session_matches_transpile() {
    let source = "func square(n: Int) -> Int {\n    n * n\n}\nprint 3";
    let compilation = Session::new().compile_string(source).expect("should lex");
    let direct = transpiler::transpile(source).expect("should lex");

    assert_eq!(compilation.output, direct.output);
    assert_eq!(compilation.statements, direct.statements);
    assert_eq!(compilation.diagnostics, direct.diagnostics);
}

/// Test: compile a file on disk
#[test]
fn test_e2e_compile_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("point.swift");
    fs::write(&path, "class Point {\n  var x: Int = 0\n  var y: Int = 0\n}\n").unwrap();

    let compilation = Session::new().compile_file(&path).expect("Compilation failed");

    assert!(compilation.is_clean());
    assert_eq!(compilation.output, "class Point {\n  x = 0;\n  y = 0;\n}");
}

/// Test: missing file is an I/O error
#[test]
fn test_e2e_compile_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Session::new()
        .compile_file(dir.path().join("absent.swift"))
        .unwrap_err();
    assert!(matches!(err, CliError::Io(_)));
}

/// Test: build then read back a project directory
#[test]
fn test_e2e_build_project() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.swift"), "print 0").unwrap();
    fs::write(
        dir.path().join("math.swift"),
        "func add(a: Int, b: Int) -> Int { a + b }\nlet two = 1 + 1",
    )
    .unwrap();

    let session = Session::new().with_indent_width(4);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let report = run_build(&session, &BuildOptions::new(dir.path()), &mut out, &mut err).unwrap();

    assert!(report.is_success());
    assert_eq!(report.built, 1);
    assert!(!dir.path().join("main.js").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("math.js")).unwrap(),
        "function add(a, b) {\n    return (a + b);\n}\nconst two = (1 + 1);\n"
    );
}

/// Test: piped source prints both sections
#[test]
fn test_e2e_pipe_sections() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    compile_piped(&Session::new(), "print \"a\" + \"b\"", &mut out, &mut err).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "=== AST ===\nPrintStmt\n  BinaryExpr(+)\n    StringLiteral(\"a\")\n    StringLiteral(\"b\")\n\n=== Generated JS ===\nconsole.log((\"a\" + \"b\"));\n"
    );
}

/// Test: piped source with a JSON AST
#[test]
fn test_e2e_pipe_json_ast() {
    let session = Session::new().with_ast_format(AstFormat::Json);
    let mut out = Vec::new();
    let mut err = Vec::new();
    compile_piped(&session, "let n = 4", &mut out, &mut err).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"VariableDeclaration\""));
    assert!(text.ends_with("=== Generated JS ===\nconst n = 4;\n"));
}

/// Test: REPL evaluation of a multi-line input
#[test]
fn test_e2e_repl_evaluate() {
    let mut out = Vec::new();
    evaluate(&Session::new(), "func f() -> Int {\n  7\n}", &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "function f() {\n  return 7;\n}\n"
    );
}
