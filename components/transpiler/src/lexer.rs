//! Lexer - tokenizes Swift-subset source code into tokens

use core_types::{LexError, SourcePosition};
use serde::Serialize;
use std::fmt;

/// Keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Keyword {
    /// class keyword
    Class,
    /// print keyword
    Print,
    /// var keyword
    Var,
    /// let keyword
    Let,
    /// func keyword
    Func,
}

impl Keyword {
    /// Spelling of the keyword in source
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Print => "print",
            Keyword::Var => "var",
            Keyword::Let => "let",
            Keyword::Func => "func",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Punctuators (operators and delimiters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Punctuator {
    /// Plus
    Plus,
    /// Minus
    Minus,
    /// Multiply
    Star,
    /// Divide
    Slash,
    /// Assignment
    Assign,
    /// Opening parenthesis
    LParen,
    /// Closing parenthesis
    RParen,
    /// Opening brace
    LBrace,
    /// Closing brace
    RBrace,
    /// Comma
    Comma,
    /// Colon
    Colon,
    /// Semicolon
    Semicolon,
    /// Return type arrow
    Arrow,
}

impl Punctuator {
    /// Spelling of the punctuator in source
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuator::Plus => "+",
            Punctuator::Minus => "-",
            Punctuator::Star => "*",
            Punctuator::Slash => "/",
            Punctuator::Assign => "=",
            Punctuator::LParen => "(",
            Punctuator::RParen => ")",
            Punctuator::LBrace => "{",
            Punctuator::RBrace => "}",
            Punctuator::Comma => ",",
            Punctuator::Colon => ":",
            Punctuator::Semicolon => ";",
            Punctuator::Arrow => "->",
        }
    }
}

impl fmt::Display for Punctuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Unsigned decimal integer literal
    IntLiteral(u64),
    /// Identifier (variable name, function name, etc.)
    Identifier(String),
    /// String literal with escapes already resolved
    StringLiteral(String),
    /// Keyword
    Keyword(Keyword),
    /// Built-in type name (`Int`, `Bool`, `String`), carrying its spelling
    TypeKeyword(String),
    /// Punctuator/operator
    Punctuator(Punctuator),
    /// End of file
    EOF,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(value) => write!(f, "integer {}", value),
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::StringLiteral(value) => write!(f, "string {:?}", value),
            Token::Keyword(k) => write!(f, "'{}'", k),
            Token::TypeKeyword(name) => write!(f, "type '{}'", name),
            Token::Punctuator(p) => write!(f, "'{}'", p),
            Token::EOF => f.write_str("end of input"),
        }
    }
}

/// A token together with the position of its first character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpannedToken {
    /// The token
    pub token: Token,
    /// Where the token starts
    pub position: SourcePosition,
}

/// Lexer for Swift-subset source code
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the whole source, ending with [`Token::EOF`]
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        Ok(self
            .tokenize_spanned()?
            .into_iter()
            .map(|spanned| spanned.token)
            .collect())
    }

    /// Tokenize the whole source, keeping the start position of every token
    pub fn tokenize_spanned(mut self) -> Result<Vec<SpannedToken>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_spanned_token()?;
            let done = spanned.token == Token::EOF;
            tokens.push(spanned);
            if done {
                break;
            }
        }
        tracing::debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Get the next token from the source
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        Ok(self.next_spanned_token()?.token)
    }

    /// Get the next token and its start position.
    ///
    /// Once the end of input is reached every further call yields `EOF`.
    pub fn next_spanned_token(&mut self) -> Result<SpannedToken, LexError> {
        while !self.is_at_end() {
            let start = self.current_position();
            let ch = self.peek();

            let token = match ch {
                ' ' | '\t' | '\r' | '\n' => {
                    self.skip_whitespace();
                    continue;
                }
                '+' => self.single(Punctuator::Plus),
                '*' => self.single(Punctuator::Star),
                '/' => self.single(Punctuator::Slash),
                '=' => self.single(Punctuator::Assign),
                '(' => self.single(Punctuator::LParen),
                ')' => self.single(Punctuator::RParen),
                '{' => self.single(Punctuator::LBrace),
                '}' => self.single(Punctuator::RBrace),
                ',' => self.single(Punctuator::Comma),
                ':' => self.single(Punctuator::Colon),
                ';' => self.single(Punctuator::Semicolon),
                '-' => {
                    self.advance();
                    if self.match_char('>') {
                        Token::Punctuator(Punctuator::Arrow)
                    } else {
                        Token::Punctuator(Punctuator::Minus)
                    }
                }
                '"' => {
                    self.advance();
                    self.scan_string()
                }
                '\u{201C}' | '\u{201D}' => {
                    return Err(LexError::SmartQuote { position: start });
                }
                c if c.is_ascii_digit() => self.scan_number(start)?,
                c if c.is_alphabetic() => self.scan_identifier(),
                other => {
                    tracing::trace!(character = ?other, position = %start, "skipping character");
                    self.advance();
                    continue;
                }
            };

            return Ok(SpannedToken {
                token,
                position: start,
            });
        }

        Ok(SpannedToken {
            token: Token::EOF,
            position: self.current_position(),
        })
    }

    fn single(&mut self, p: Punctuator) -> Token {
        self.advance();
        Token::Punctuator(p)
    }

    /// Scan a string body; the opening quote is already consumed.
    ///
    /// An unterminated string runs to the end of input.
    fn scan_string(&mut self) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            match self.advance() {
                '"' => break,
                '\\' => {
                    if self.is_at_end() {
                        break;
                    }
                    match self.advance() {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        // `\"`, `\\` and any other escaped character pass through
                        escaped => value.push(escaped),
                    }
                }
                c => value.push(c),
            }
        }

        Token::StringLiteral(value)
    }

    fn scan_number(&mut self, start: SourcePosition) -> Result<Token, LexError> {
        let mut digits = String::new();
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            digits.push(self.advance());
        }

        digits
            .parse::<u64>()
            .map(Token::IntLiteral)
            .map_err(|_| LexError::IntegerOverflow {
                literal: digits,
                position: start,
            })
    }

    fn scan_identifier(&mut self) -> Token {
        let mut ident = String::new();
        while !self.is_at_end() && self.peek().is_alphabetic() {
            ident.push(self.advance());
        }

        match ident.as_str() {
            "class" => Token::Keyword(Keyword::Class),
            "print" => Token::Keyword(Keyword::Print),
            "var" => Token::Keyword(Keyword::Var),
            "let" => Token::Keyword(Keyword::Let),
            "func" => Token::Keyword(Keyword::Func),
            "Int" | "Bool" | "String" => Token::TypeKeyword(ident),
            _ => Token::Identifier(ident),
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && matches!(self.peek(), ' ' | '\t' | '\r' | '\n') {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.position]
        }
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.position] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    fn current_position(&self) -> SourcePosition {
        SourcePosition {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }
}

/// Tokenize `source` into a token sequence terminated by [`Token::EOF`]
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::Identifier(name.to_string())
    }

    fn punct(p: Punctuator) -> Token {
        Token::Punctuator(p)
    }

    #[test]
    fn test_lexer_empty_source() {
        assert_eq!(tokenize("").unwrap(), vec![Token::EOF]);
    }

    #[test]
    fn test_lexer_eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap(), ident("x"));
        assert_eq!(lexer.next_token().unwrap(), Token::EOF);
        assert_eq!(lexer.next_token().unwrap(), Token::EOF);
    }

    #[test]
    fn test_lexer_identifiers_and_keywords() {
        let tokens = tokenize("print var let foo:Int = 12;").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Print),
                Token::Keyword(Keyword::Var),
                Token::Keyword(Keyword::Let),
                ident("foo"),
                punct(Punctuator::Colon),
                Token::TypeKeyword("Int".to_string()),
                punct(Punctuator::Assign),
                Token::IntLiteral(12),
                punct(Punctuator::Semicolon),
                Token::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_type_keywords() {
        let tokens = tokenize("Bool String Unknown").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::TypeKeyword("Bool".to_string()),
                Token::TypeKeyword("String".to_string()),
                ident("Unknown"),
                Token::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_operators_and_punctuation() {
        let tokens = tokenize("+-*/=():;{},").unwrap();
        assert_eq!(
            tokens,
            vec![
                punct(Punctuator::Plus),
                punct(Punctuator::Minus),
                punct(Punctuator::Star),
                punct(Punctuator::Slash),
                punct(Punctuator::Assign),
                punct(Punctuator::LParen),
                punct(Punctuator::RParen),
                punct(Punctuator::Colon),
                punct(Punctuator::Semicolon),
                punct(Punctuator::LBrace),
                punct(Punctuator::RBrace),
                punct(Punctuator::Comma),
                Token::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_arrow_and_minus() {
        let tokens = tokenize("-> - >").unwrap();
        assert_eq!(
            tokens,
            vec![punct(Punctuator::Arrow), punct(Punctuator::Minus), Token::EOF]
        );
    }

    #[test]
    fn test_lexer_complex_whitespace() {
        let tokens = tokenize(" \t123\nfoo   +   456").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::IntLiteral(123),
                ident("foo"),
                punct(Punctuator::Plus),
                Token::IntLiteral(456),
                Token::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_string_escapes() {
        let tokens = tokenize(r#""a\"b\\c\nd\te\q""#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::StringLiteral("a\"b\\c\nd\teq".to_string()), Token::EOF]
        );
    }

    #[test]
    fn test_lexer_unterminated_string_runs_to_end() {
        let tokens = tokenize("\"abc").unwrap();
        assert_eq!(tokens, vec![Token::StringLiteral("abc".to_string()), Token::EOF]);
    }

    #[test]
    fn test_lexer_unknown_characters_are_skipped() {
        let tokens = tokenize("a % b _ # c").unwrap();
        assert_eq!(tokens, vec![ident("a"), ident("b"), ident("c"), Token::EOF]);
    }

    #[test]
    fn test_lexer_smart_quote_is_rejected() {
        let err = tokenize("print \u{201C}hi\u{201D}").unwrap_err();
        assert_eq!(
            err,
            LexError::SmartQuote {
                position: SourcePosition::new(1, 7, 6)
            }
        );
    }

    #[test]
    fn test_lexer_smart_quote_inside_string_is_content() {
        let tokens = tokenize("\"\u{201C}\"").unwrap();
        assert_eq!(
            tokens,
            vec![Token::StringLiteral("\u{201C}".to_string()), Token::EOF]
        );
    }

    #[test]
    fn test_lexer_integer_overflow() {
        let err = tokenize("99999999999999999999").unwrap_err();
        assert!(matches!(err, LexError::IntegerOverflow { ref literal, .. } if literal == "99999999999999999999"));
    }

    #[test]
    fn test_lexer_letters_only_identifiers() {
        let tokens = tokenize("abc1").unwrap();
        assert_eq!(tokens, vec![ident("abc"), Token::IntLiteral(1), Token::EOF]);
    }

    #[test]
    fn test_lexer_positions() {
        let tokens = Lexer::new("var x\n  = 1").tokenize_spanned().unwrap();
        let positions: Vec<(u32, u32)> = tokens
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect();
        assert_eq!(positions, vec![(1, 1), (1, 5), (2, 3), (2, 5), (2, 6)]);
    }

    #[test]
    fn test_lexer_is_pure() {
        let source = "func add(x: Int, y: Int) -> Int { x + y }";
        assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(punct(Punctuator::Arrow).to_string(), "'->'");
        assert_eq!(ident("foo").to_string(), "identifier 'foo'");
        assert_eq!(Token::EOF.to_string(), "end of input");
    }
}
