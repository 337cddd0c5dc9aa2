//! JavaScript generation from AST

use crate::ast::*;

const DEFAULT_INDENT_WIDTH: usize = 2;

/// How a function body is introduced in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionForm {
    /// `function name(...) {`
    Declaration,
    /// `name(...) {` inside a class body
    Method,
}

/// Code generator that renders statements as JavaScript source
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    indent_unit: String,
}

impl CodeGenerator {
    /// Create a generator using two-space indentation
    pub fn new() -> Self {
        Self::with_indent_width(DEFAULT_INDENT_WIDTH)
    }

    /// Create a generator indenting each block level by `width` spaces
    pub fn with_indent_width(width: usize) -> Self {
        Self {
            indent_unit: " ".repeat(width),
        }
    }

    /// Generate JavaScript for a statement sequence.
    ///
    /// One statement per line; block bodies are indented one level per
    /// nesting depth. The result has no trailing newline.
    pub fn generate(&self, statements: &[Statement]) -> String {
        let mut lines = Vec::new();
        for statement in statements {
            self.visit_statement(statement, 0, &mut lines);
        }
        tracing::debug!(
            statements = statements.len(),
            lines = lines.len(),
            "generated javascript"
        );
        lines.join("\n")
    }

    fn visit_statement(&self, statement: &Statement, depth: usize, out: &mut Vec<String>) {
        match statement {
            Statement::VariableDeclaration {
                kind, name, init, ..
            } => {
                // Swift `var`/`let` map onto the block-scoped `let`/`const`
                let keyword = match kind {
                    VariableKind::Var => "let",
                    VariableKind::Let => "const",
                };
                self.line(
                    depth,
                    format!("{} {} = {};", keyword, name, self.expression(init)),
                    out,
                );
            }

            Statement::Assignment { name, value } => {
                self.line(depth, format!("{} = {};", name, self.expression(value)), out);
            }

            Statement::PrintStatement { expression } => {
                self.line(
                    depth,
                    format!("console.log({});", self.expression(expression)),
                    out,
                );
            }

            Statement::ExpressionStatement { expression } => {
                self.line(depth, format!("{};", self.expression(expression)), out);
            }

            Statement::FunctionDeclaration {
                name,
                params,
                return_type,
                body,
            } => {
                self.visit_function(
                    FunctionForm::Declaration,
                    name,
                    params,
                    return_type.is_some(),
                    body,
                    depth,
                    out,
                );
            }

            Statement::ClassDeclaration { name, members } => {
                self.visit_class(name, members, depth, out);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn visit_function(
        &self,
        form: FunctionForm,
        name: &str,
        params: &[Parameter],
        returns_value: bool,
        body: &[Statement],
        depth: usize,
        out: &mut Vec<String>,
    ) {
        // Parameter types are compile-time only
        let params = params
            .iter()
            .map(|param| param.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let header = match form {
            FunctionForm::Declaration => format!("function {}({}) {{", name, params),
            FunctionForm::Method => format!("{}({}) {{", name, params),
        };
        self.line(depth, header, out);

        let last = body.len().saturating_sub(1);
        for (i, statement) in body.iter().enumerate() {
            match statement {
                Statement::ExpressionStatement { expression } if returns_value && i == last => {
                    self.line(
                        depth + 1,
                        format!("return {};", self.expression(expression)),
                        out,
                    );
                }
                _ => self.visit_statement(statement, depth + 1, out),
            }
        }

        self.line(depth, "}".to_string(), out);
    }

    fn visit_class(&self, name: &str, members: &[Statement], depth: usize, out: &mut Vec<String>) {
        self.line(depth, format!("class {} {{", name), out);

        for member in members {
            match member {
                // Both bindings become instance field initializers
                Statement::VariableDeclaration { name, init, .. } => {
                    self.line(
                        depth + 1,
                        format!("{} = {};", name, self.expression(init)),
                        out,
                    );
                }
                Statement::FunctionDeclaration {
                    name,
                    params,
                    return_type,
                    body,
                } => {
                    self.visit_function(
                        FunctionForm::Method,
                        name,
                        params,
                        return_type.is_some(),
                        body,
                        depth + 1,
                        out,
                    );
                }
                other => {
                    let member = match other {
                        Statement::ClassDeclaration { .. } => "nested class",
                        Statement::Assignment { .. } => "assignment",
                        Statement::PrintStatement { .. } => "print statement",
                        _ => "expression statement",
                    };
                    tracing::warn!(class = name, member, "class member has no class-body form; omitted");
                }
            }
        }

        self.line(depth, "}".to_string(), out);
    }

    fn expression(&self, expression: &Expression) -> String {
        match expression {
            Expression::Identifier { name } => name.clone(),
            Expression::IntLiteral { value } => value.to_string(),
            Expression::StringLiteral { value } => escape_string(value),
            Expression::BinaryExpression {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                self.expression(left),
                operator.symbol(),
                self.expression(right)
            ),
        }
    }

    fn line(&self, depth: usize, text: String, out: &mut Vec<String>) {
        out.push(format!("{}{}", self.indent_unit.repeat(depth), text));
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a string literal in double-quoted JavaScript form
fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

/// Generate JavaScript for `statements` with the default indentation
pub fn generate(statements: &[Statement]) -> String {
    CodeGenerator::new().generate(statements)
}
