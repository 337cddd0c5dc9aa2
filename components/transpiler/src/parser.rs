//! Recursive descent parser for the Swift subset
//!
//! Statements are dispatched on their leading token; expressions use one
//! parsing function per precedence tier. Syntax errors never abort the parse:
//! each one is recorded as a [`Diagnostic`] and the parser resynchronizes at
//! the next statement terminator.

use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Punctuator, SpannedToken, Token};
use core_types::{Diagnostic, SourcePosition};

/// Combined depth of open blocks and parentheses the parser accepts
pub const MAX_NESTING: usize = 256;

/// Parser over a finished token sequence
pub struct Parser {
    tokens: Vec<Token>,
    /// Start position per token; empty when the caller supplied bare tokens
    positions: Vec<SourcePosition>,
    current: usize,
    /// Number of enclosing `{ ... }` blocks
    depth: usize,
    /// Number of enclosing `( ... )` groups in the current expression
    paren_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    /// Create a parser over bare tokens.
    ///
    /// A missing end marker is appended.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last() != Some(&Token::EOF) {
            tokens.push(Token::EOF);
        }
        Self {
            tokens,
            positions: Vec::new(),
            current: 0,
            depth: 0,
            paren_depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Create a parser over positioned tokens; diagnostics will carry the
    /// position of the offending token, and a newline may end a statement.
    pub fn with_positions(spanned: Vec<SpannedToken>) -> Self {
        let mut tokens = Vec::with_capacity(spanned.len() + 1);
        let mut positions = Vec::with_capacity(spanned.len() + 1);
        for SpannedToken { token, position } in spanned {
            tokens.push(token);
            positions.push(position);
        }
        if tokens.last() != Some(&Token::EOF) {
            tokens.push(Token::EOF);
            positions.push(positions.last().copied().unwrap_or_default());
        }
        Self {
            tokens,
            positions,
            current: 0,
            depth: 0,
            paren_depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Parse every statement in the token sequence.
    ///
    /// Returns the well-formed statements in source order together with one
    /// diagnostic per malformed statement.
    pub fn parse_program(mut self) -> (Vec<Statement>, Vec<Diagnostic>) {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(statement) = self.parse_statement_recovering() {
                statements.push(statement);
            }
        }

        tracing::debug!(
            statements = statements.len(),
            diagnostics = self.diagnostics.len(),
            "parsed program"
        );
        (statements, self.diagnostics)
    }

    /// Parse one statement, turning a failure into a recorded diagnostic
    fn parse_statement_recovering(&mut self) -> Option<Statement> {
        let start = self.current;
        match self.parse_statement() {
            Ok(statement) => Some(statement),
            Err(diagnostic) => {
                tracing::debug!(%diagnostic, "recording syntax error");
                self.diagnostics.push(diagnostic);
                self.synchronize(start);
                None
            }
        }
    }

    /// Skip to a safe point after a failed statement that began at `start`.
    ///
    /// Consumes through the next `;` and stops at the end marker, before a
    /// token starting a later line when positions are known, or, inside a
    /// block, before the closing `}`. A statement that failed on its first
    /// token always loses that token.
    fn synchronize(&mut self, start: usize) {
        if self.current == start {
            let was_terminator = self.check_punctuator(Punctuator::Semicolon);
            self.advance();
            if was_terminator {
                return;
            }
        }

        loop {
            match self.peek() {
                Token::EOF => break,
                Token::Punctuator(Punctuator::RBrace) if self.depth > 0 => break,
                Token::Punctuator(Punctuator::Semicolon) => {
                    self.advance();
                    break;
                }
                _ if self.starts_new_line() => break,
                skipped => {
                    tracing::trace!(token = %skipped, "skipping token");
                    self.advance();
                }
            }
        }

        tracing::debug!(skipped = self.current - start, "resynchronized");
    }

    fn parse_statement(&mut self) -> Result<Statement, Diagnostic> {
        let token = self.peek().clone();

        match token {
            Token::Keyword(Keyword::Class) => self.parse_class_declaration(),
            Token::Keyword(Keyword::Func) => self.parse_function_declaration(),
            Token::Keyword(Keyword::Var) => self.parse_variable_declaration(VariableKind::Var),
            Token::Keyword(Keyword::Let) => self.parse_variable_declaration(VariableKind::Let),
            Token::Keyword(Keyword::Print) => self.parse_print_statement(),
            Token::Identifier(_)
                if matches!(
                    self.peek_next(),
                    Some(Token::Punctuator(Punctuator::Assign))
                ) =>
            {
                self.parse_assignment()
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_class_declaration(&mut self) -> Result<Statement, Diagnostic> {
        self.advance(); // class
        let name = self.expect_identifier("class name after 'class'")?;
        let members = self.parse_block("class body")?;
        self.skip_optional_semicolon();

        Ok(Statement::ClassDeclaration { name, members })
    }

    fn parse_function_declaration(&mut self) -> Result<Statement, Diagnostic> {
        self.advance(); // func
        let name = self.expect_identifier("function name after 'func'")?;
        let params = self.parse_parameters()?;

        let return_type = if self.check_punctuator(Punctuator::Arrow) {
            self.advance();
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        let body = self.parse_block("function body")?;
        self.skip_optional_semicolon();

        Ok(Statement::FunctionDeclaration {
            name,
            params,
            return_type,
            body,
        })
    }

    /// `( (IDENT : TYPE (, IDENT : TYPE)*)? )`
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, Diagnostic> {
        self.expect_punctuator(Punctuator::LParen, "'(' after function name")?;

        let mut params = Vec::new();
        if !self.check_punctuator(Punctuator::RParen) {
            loop {
                let name = self.expect_identifier("parameter name")?;
                self.expect_punctuator(Punctuator::Colon, "':' after parameter name")?;
                let type_annotation = self.parse_type_annotation()?;
                params.push(Parameter {
                    name,
                    type_annotation,
                });

                if !self.check_punctuator(Punctuator::Comma) {
                    break;
                }
                self.advance();
            }
        }

        self.expect_punctuator(Punctuator::RParen, "')' after parameters")?;
        Ok(params)
    }

    /// `{ statement* }`, recovering from errors inside the block
    fn parse_block(&mut self, context: &str) -> Result<Vec<Statement>, Diagnostic> {
        if self.check_punctuator(Punctuator::LBrace) && self.nesting() >= MAX_NESTING {
            return Err(self.reject_nested(Punctuator::LBrace, Punctuator::RBrace));
        }
        self.expect_punctuator(Punctuator::LBrace, &format!("'{{' to open {}", context))?;

        self.depth += 1;
        let body = self.parse_block_body(context);
        self.depth -= 1;

        body
    }

    fn parse_block_body(&mut self, context: &str) -> Result<Vec<Statement>, Diagnostic> {
        let mut body = Vec::new();

        while !self.check_punctuator(Punctuator::RBrace) && !self.is_at_end() {
            if let Some(statement) = self.parse_statement_recovering() {
                body.push(statement);
            }
        }

        self.expect_punctuator(Punctuator::RBrace, &format!("'}}' to close {}", context))?;
        Ok(body)
    }

    fn parse_variable_declaration(&mut self, kind: VariableKind) -> Result<Statement, Diagnostic> {
        let keyword = match kind {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
        };
        self.advance(); // var / let

        let name = self.expect_identifier(&format!("identifier after '{}'", keyword))?;

        let type_annotation = if self.check_punctuator(Punctuator::Colon) {
            self.advance();
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        self.expect_punctuator(
            Punctuator::Assign,
            &format!("'=' and an initializer in '{}' declaration", keyword),
        )?;
        let init = self.parse_expression()?;
        self.consume_terminator("declaration")?;

        Ok(Statement::VariableDeclaration {
            kind,
            name,
            type_annotation,
            init,
        })
    }

    fn parse_print_statement(&mut self) -> Result<Statement, Diagnostic> {
        self.advance(); // print
        let expression = self.parse_expression()?;
        self.consume_terminator("print statement")?;

        Ok(Statement::PrintStatement { expression })
    }

    fn parse_assignment(&mut self) -> Result<Statement, Diagnostic> {
        let name = self.expect_identifier("assignment target")?;
        self.expect_punctuator(Punctuator::Assign, "'=' in assignment")?;
        let value = self.parse_expression()?;
        self.consume_terminator("assignment")?;

        Ok(Statement::Assignment { name, value })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, Diagnostic> {
        let expression = self.parse_expression()?;
        self.consume_terminator("expression")?;

        Ok(Statement::ExpressionStatement { expression })
    }

    fn parse_type_annotation(&mut self) -> Result<TypeAnnotation, Diagnostic> {
        let annotation = match self.peek() {
            Token::TypeKeyword(spelling) => TypeAnnotation::from_spelling(spelling),
            _ => None,
        };

        match annotation {
            Some(annotation) => {
                self.advance();
                Ok(annotation)
            }
            None => Err(invalid_type(self.peek(), self.current_position())),
        }
    }

    fn parse_expression(&mut self) -> Result<Expression, Diagnostic> {
        self.parse_additive_expression()
    }

    fn parse_additive_expression(&mut self) -> Result<Expression, Diagnostic> {
        let mut left = self.parse_multiplicative_expression()?;

        loop {
            let op = match self.peek() {
                Token::Punctuator(Punctuator::Plus) => BinaryOperator::Add,
                Token::Punctuator(Punctuator::Minus) => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative_expression()?;
            left = Expression::BinaryExpression {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expression, Diagnostic> {
        let mut left = self.parse_primary_expression()?;

        loop {
            let op = match self.peek() {
                Token::Punctuator(Punctuator::Star) => BinaryOperator::Mul,
                Token::Punctuator(Punctuator::Slash) => BinaryOperator::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_primary_expression()?;
            left = Expression::BinaryExpression {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_primary_expression(&mut self) -> Result<Expression, Diagnostic> {
        let expression = match self.peek() {
            Token::IntLiteral(value) => Expression::IntLiteral { value: *value },
            Token::StringLiteral(value) => Expression::StringLiteral {
                value: value.clone(),
            },
            Token::Identifier(name) => Expression::Identifier { name: name.clone() },
            Token::Punctuator(Punctuator::LParen) => {
                if self.nesting() >= MAX_NESTING {
                    return Err(self.reject_nested(Punctuator::LParen, Punctuator::RParen));
                }
                self.advance();
                self.paren_depth += 1;
                let inner = self.parse_expression();
                self.paren_depth -= 1;
                let inner = inner?;
                self.expect_punctuator(Punctuator::RParen, "')' to close parenthesized expression")?;
                return Ok(inner);
            }
            other => return Err(unexpected_token("expression", other, self.current_position())),
        };

        self.advance();
        Ok(expression)
    }

    /// Accept the end of a simple statement.
    ///
    /// A `;` is consumed when present. Without one the statement still ends
    /// before the end marker, before `}`, or before a token on a later line.
    fn consume_terminator(&mut self, after: &str) -> Result<(), Diagnostic> {
        if self.check_punctuator(Punctuator::Semicolon) {
            self.advance();
            return Ok(());
        }

        if self.is_at_end()
            || self.check_punctuator(Punctuator::RBrace)
            || self.starts_new_line()
        {
            return Ok(());
        }

        Err(unexpected_token(
            &format!("';' after {}", after),
            self.peek(),
            self.current_position(),
        ))
    }

    // Helper methods

    fn nesting(&self) -> usize {
        self.depth + self.paren_depth
    }

    /// Skip the group opened by the current `open` token through its matching
    /// `close` (or the end marker) and report it as nested too deeply.
    ///
    /// The whole group is consumed so that the enclosing constructs still
    /// see their own closing tokens.
    fn reject_nested(&mut self, open: Punctuator, close: Punctuator) -> Diagnostic {
        let diagnostic = nesting_too_deep(MAX_NESTING, self.current_position());
        let start = self.current;
        let mut balance = 0usize;

        while !self.is_at_end() {
            if self.check_punctuator(open) {
                balance += 1;
            } else if self.check_punctuator(close) {
                balance -= 1;
            }
            self.advance();
            if balance == 0 {
                break;
            }
        }

        tracing::debug!(skipped = self.current - start, "skipped deeply nested group");
        diagnostic
    }

    fn skip_optional_semicolon(&mut self) {
        if self.check_punctuator(Punctuator::Semicolon) {
            self.advance();
        }
    }

    fn starts_new_line(&self) -> bool {
        if self.current == 0 {
            return false;
        }
        match (
            self.positions.get(self.current - 1),
            self.positions.get(self.current),
        ) {
            (Some(previous), Some(current)) => current.line > previous.line,
            _ => false,
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::EOF)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    /// Move to the next token; the end marker is never passed
    fn advance(&mut self) {
        if self.current + 1 < self.tokens.len() {
            self.current += 1;
        }
    }

    fn current_position(&self) -> Option<SourcePosition> {
        self.positions.get(self.current).copied()
    }

    fn check_punctuator(&self, p: Punctuator) -> bool {
        matches!(self.peek(), Token::Punctuator(x) if *x == p)
    }

    /// Consume `p` or fail, leaving the offending token in place
    fn expect_punctuator(&mut self, p: Punctuator, expected: &str) -> Result<(), Diagnostic> {
        if self.check_punctuator(p) {
            self.advance();
            return Ok(());
        }
        Err(unexpected_token(expected, self.peek(), self.current_position()))
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<String, Diagnostic> {
        if let Token::Identifier(name) = self.peek() {
            let name = name.clone();
            self.advance();
            return Ok(name);
        }
        Err(unexpected_token(expected, self.peek(), self.current_position()))
    }
}

/// Parse a bare token sequence into statements and diagnostics
pub fn parse_program(tokens: Vec<Token>) -> (Vec<Statement>, Vec<Diagnostic>) {
    Parser::new(tokens).parse_program()
}
