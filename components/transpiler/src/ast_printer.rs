//! Indented tree rendering of the AST

use crate::ast::*;
use std::fmt::Write;

/// Renders statements as an indented tree, one node per line
#[derive(Debug, Default)]
pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    /// Render `statements`, indenting children two spaces per level
    pub fn print(statements: &[Statement]) -> String {
        let mut printer = AstPrinter::default();
        for statement in statements {
            printer.statement(statement, 0);
        }
        printer.out
    }

    fn statement(&mut self, statement: &Statement, depth: usize) {
        match statement {
            Statement::ClassDeclaration { name, members } => {
                self.node(depth, format_args!("ClassDecl({})", name));
                for member in members {
                    self.statement(member, depth + 1);
                }
            }
            Statement::FunctionDeclaration {
                name,
                params,
                return_type,
                body,
            } => {
                match return_type {
                    Some(ty) => self.node(depth, format_args!("FuncDecl({} -> {})", name, ty)),
                    None => self.node(depth, format_args!("FuncDecl({})", name)),
                }
                if !params.is_empty() {
                    self.node(depth + 1, format_args!("Parameters:"));
                    for param in params {
                        self.node(
                            depth + 2,
                            format_args!("{}: {}", param.name, param.type_annotation),
                        );
                    }
                }
                if !body.is_empty() {
                    self.node(depth + 1, format_args!("Body:"));
                    for statement in body {
                        self.statement(statement, depth + 2);
                    }
                }
            }
            Statement::VariableDeclaration {
                kind,
                name,
                type_annotation,
                init,
            } => {
                let label = match kind {
                    VariableKind::Var => "VarDecl",
                    VariableKind::Let => "LetDecl",
                };
                match type_annotation {
                    Some(ty) => self.node(depth, format_args!("{}({}: {})", label, name, ty)),
                    None => self.node(depth, format_args!("{}({})", label, name)),
                }
                self.expression(init, depth + 1);
            }
            Statement::Assignment { name, value } => {
                self.node(depth, format_args!("Assignment({})", name));
                self.expression(value, depth + 1);
            }
            Statement::PrintStatement { expression } => {
                self.node(depth, format_args!("PrintStmt"));
                self.expression(expression, depth + 1);
            }
            Statement::ExpressionStatement { expression } => {
                self.node(depth, format_args!("ExprStmt"));
                self.expression(expression, depth + 1);
            }
        }
    }

    fn expression(&mut self, expression: &Expression, depth: usize) {
        match expression {
            Expression::Identifier { name } => {
                self.node(depth, format_args!("Identifier({})", name))
            }
            Expression::IntLiteral { value } => {
                self.node(depth, format_args!("IntLiteral({})", value))
            }
            Expression::StringLiteral { value } => {
                self.node(depth, format_args!("StringLiteral({:?})", value))
            }
            Expression::BinaryExpression {
                left,
                operator,
                right,
            } => {
                self.node(depth, format_args!("BinaryExpr({})", operator));
                self.expression(left, depth + 1);
                self.expression(right, depth + 1);
            }
        }
    }

    fn node(&mut self, depth: usize, label: std::fmt::Arguments<'_>) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        // Writing into a String cannot fail
        let _ = self.out.write_fmt(label);
        self.out.push('\n');
    }
}
