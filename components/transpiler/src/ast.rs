//! Abstract Syntax Tree node definitions

use serde::Serialize;
use std::fmt;

/// Statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    /// Class declaration
    ClassDeclaration {
        /// Class name
        name: String,
        /// Member statements, parsed with the ordinary statement grammar
        members: Vec<Statement>,
    },

    /// Function declaration
    FunctionDeclaration {
        /// Function name
        name: String,
        /// Parameters in declaration order
        params: Vec<Parameter>,
        /// Declared return type
        return_type: Option<TypeAnnotation>,
        /// Function body
        body: Vec<Statement>,
    },

    /// Variable declaration (var, let)
    VariableDeclaration {
        /// Declaration kind
        kind: VariableKind,
        /// Variable name
        name: String,
        /// Declared type
        type_annotation: Option<TypeAnnotation>,
        /// Initializer
        init: Expression,
    },

    /// Assignment to an existing name
    Assignment {
        /// Target name
        name: String,
        /// Assigned value
        value: Expression,
    },

    /// Print statement
    PrintStatement {
        /// Value to print
        expression: Expression,
    },

    /// Expression statement
    ExpressionStatement {
        /// The expression
        expression: Expression,
    },
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    /// Mutable binding
    Var,
    /// Immutable binding
    Let,
}

/// A function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub type_annotation: TypeAnnotation,
}

impl Parameter {
    /// Create a parameter
    pub fn new(name: impl Into<String>, type_annotation: TypeAnnotation) -> Self {
        Self {
            name: name.into(),
            type_annotation,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    /// Identifier reference
    Identifier {
        /// Referenced name
        name: String,
    },

    /// Integer literal
    IntLiteral {
        /// Literal value
        value: u64,
    },

    /// String literal
    StringLiteral {
        /// Literal text, escapes resolved
        value: String,
    },

    /// Binary operation
    BinaryExpression {
        /// Left operand
        left: Box<Expression>,
        /// Operator
        operator: BinaryOperator,
        /// Right operand
        right: Box<Expression>,
    },
}

impl Expression {
    /// Identifier expression
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier { name: name.into() }
    }

    /// Integer literal expression
    pub fn int(value: u64) -> Self {
        Expression::IntLiteral { value }
    }

    /// String literal expression
    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringLiteral {
            value: value.into(),
        }
    }

    /// Binary expression
    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
}

impl BinaryOperator {
    /// The operator as written in both source and output
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Built-in type annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeAnnotation {
    /// `Int`
    Int,
    /// `Bool`
    Bool,
    /// `String`
    String,
}

impl TypeAnnotation {
    /// Map a type spelling to its annotation
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        match spelling {
            "Int" => Some(TypeAnnotation::Int),
            "Bool" => Some(TypeAnnotation::Bool),
            "String" => Some(TypeAnnotation::String),
            _ => None,
        }
    }

    /// Spelling of the type in source
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeAnnotation::Int => "Int",
            TypeAnnotation::Bool => "Bool",
            TypeAnnotation::String => "String",
        }
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
